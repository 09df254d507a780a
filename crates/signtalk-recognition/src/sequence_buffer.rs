//! 시퀀스 버퍼.
//!
//! 프레임별 랜드마크 벡터를 30개짜리 윈도우로 조립한다.
//! 미검출 프레임은 건너뛰고, 완성된 윈도우를 내보낸 뒤 즉시 비운다
//! (윈도우 간 프레임 중첩 없음).

use signtalk_core::error::CoreError;
use signtalk_core::models::landmark::LandmarkVector;
use signtalk_core::models::window::{Window, SEQUENCE_LENGTH};
use tracing::trace;

/// `append` 결과
#[derive(Debug, Clone, PartialEq)]
pub enum WindowProgress {
    /// 아직 윈도우 미완성: 현재까지 쌓인 프레임 수
    Pending {
        /// 진행 중 윈도우 길이 (0..30)
        filled: usize,
    },
    /// 30번째 프레임으로 완성된 윈도우
    Complete(Window),
}

impl WindowProgress {
    /// 완성된 윈도우가 있으면 반환
    pub fn into_window(self) -> Option<Window> {
        match self {
            Self::Complete(window) => Some(window),
            Self::Pending { .. } => None,
        }
    }
}

/// 스트림 하나의 진행 중 윈도우
#[derive(Debug, Default)]
pub struct SequenceBuffer {
    frames: Vec<LandmarkVector>,
}

impl SequenceBuffer {
    /// 빈 버퍼 생성
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(SEQUENCE_LENGTH),
        }
    }

    /// 프레임 하나 추가.
    ///
    /// `None`(미검출)은 버퍼를 진행시키지 않는다.
    pub fn append(&mut self, vector: Option<LandmarkVector>) -> WindowProgress {
        let Some(vector) = vector else {
            trace!("미검출 프레임 건너뜀 (filled={})", self.frames.len());
            return WindowProgress::Pending {
                filled: self.frames.len(),
            };
        };

        self.frames.push(vector);
        match Window::take_full(&mut self.frames) {
            Some(window) => WindowProgress::Complete(window),
            None => WindowProgress::Pending {
                filled: self.frames.len(),
            },
        }
    }

    /// 원시 스칼라 슬라이스 추가. 길이가 틀리면 버퍼를 건드리지 않고 `ShapeMismatch`.
    pub fn append_raw(&mut self, values: &[f32]) -> Result<WindowProgress, CoreError> {
        let vector = LandmarkVector::new(values.to_vec())?;
        Ok(self.append(Some(vector)))
    }

    /// 진행 중 윈도우 길이
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// 진행 중 윈도우가 비었는지
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
