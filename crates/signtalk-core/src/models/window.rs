//! 시퀀스 윈도우 모델.
//!
//! 분류기 입력 단위. 항상 정확히 [`SEQUENCE_LENGTH`]개의 벡터를 가진다.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::landmark::{LandmarkVector, VECTOR_LEN};

/// 윈도우 하나의 프레임 수
pub const SEQUENCE_LENGTH: usize = 30;

/// 도착 순서대로 정렬된 30개 랜드마크 벡터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LandmarkVector>", into = "Vec<LandmarkVector>")]
pub struct Window {
    frames: Vec<LandmarkVector>,
}

impl Window {
    /// 프레임 목록으로 생성. 길이가 30이 아니면 `ShapeMismatch`.
    pub fn new(frames: Vec<LandmarkVector>) -> Result<Self, CoreError> {
        if frames.len() != SEQUENCE_LENGTH {
            return Err(CoreError::ShapeMismatch {
                expected: SEQUENCE_LENGTH,
                actual: frames.len(),
            });
        }
        Ok(Self { frames })
    }

    /// 버퍼 앞쪽 30개를 꺼내 윈도우로 만든다.
    ///
    /// 30개 미만이면 버퍼를 그대로 두고 `None`.
    pub fn take_full(buffer: &mut Vec<LandmarkVector>) -> Option<Self> {
        if buffer.len() < SEQUENCE_LENGTH {
            return None;
        }
        Some(Self {
            frames: buffer.drain(..SEQUENCE_LENGTH).collect(),
        })
    }

    /// 단일 벡터를 30번 복제한 스냅샷 윈도우
    pub fn replicate(vector: &LandmarkVector) -> Self {
        Self {
            frames: vec![vector.clone(); SEQUENCE_LENGTH],
        }
    }

    /// 프레임 슬라이스
    pub fn frames(&self) -> &[LandmarkVector] {
        &self.frames
    }

    /// 30 × 63 행 우선 평탄화
    pub fn flatten(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(SEQUENCE_LENGTH * VECTOR_LEN);
        for frame in &self.frames {
            flat.extend_from_slice(frame.as_slice());
        }
        flat
    }
}

impl TryFrom<Vec<LandmarkVector>> for Window {
    type Error = CoreError;

    fn try_from(frames: Vec<LandmarkVector>) -> Result<Self, Self::Error> {
        Self::new(frames)
    }
}

impl From<Window> for Vec<LandmarkVector> {
    fn from(window: Window) -> Self {
        window.frames
    }
}
