//! 인식 스트림.
//!
//! 스트림 하나는 진행 중 윈도우, 마지막 방출 레이블, 누적 인식 텍스트를
//! 소유한다. 세션마다 하나, 로컬 번역 루프에 하나 존재한다.

use chrono::Utc;
use signtalk_core::config::RecognitionConfig;
use signtalk_core::models::label::SignLabel;
use signtalk_core::models::landmark::LandmarkVector;
use signtalk_core::models::prediction::Prediction;
use signtalk_core::ports::sink::EmittedSign;
use tracing::debug;

use crate::sequence_buffer::{SequenceBuffer, WindowProgress};
use crate::stabilizer::{build_stabilizer, Decision, EdgeTrigger, Stabilizer};

/// 스트림별 누적 상태
pub struct SignStream {
    buffer: SequenceBuffer,
    stabilizer: Box<dyn Stabilizer>,
    last_emitted: Option<SignLabel>,
    recognized_text: String,
}

impl SignStream {
    /// 지정한 안정화 전략으로 빈 스트림 생성
    pub fn new(stabilizer: Box<dyn Stabilizer>) -> Self {
        Self {
            buffer: SequenceBuffer::new(),
            stabilizer,
            last_emitted: None,
            recognized_text: String::new(),
        }
    }

    /// 설정의 안정화 전략으로 빈 스트림 생성
    pub fn from_config(config: &RecognitionConfig) -> Self {
        Self::new(build_stabilizer(config))
    }

    /// 프레임 하나를 버퍼에 추가
    pub fn push_frame(&mut self, vector: Option<LandmarkVector>) -> WindowProgress {
        self.buffer.append(vector)
    }

    /// 완성 윈도우의 예측을 안정화기에 통과시킨다.
    ///
    /// 방출되면 인식 텍스트에 추가하고 방출 기호를 반환한다.
    pub fn apply_prediction(&mut self, prediction: &Prediction) -> Option<EmittedSign> {
        match self.stabilizer.decide(prediction, self.last_emitted) {
            Decision::Emit => {
                self.recognized_text.push(prediction.label.as_char());
                self.last_emitted = Some(prediction.label);
                debug!(
                    "기호 방출: {} (신뢰도 {:.2}) → \"{}\"",
                    prediction.label, prediction.confidence, self.recognized_text
                );
                Some(EmittedSign {
                    label: prediction.label,
                    confidence: prediction.confidence,
                    recognized_text: self.recognized_text.clone(),
                    emitted_at: Utc::now(),
                })
            }
            Decision::Suppress(reason) => {
                debug!("예측 억제: {} ({:?})", prediction.label, reason);
                None
            }
        }
    }

    /// 마지막 방출 레이블
    pub fn last_emitted(&self) -> Option<SignLabel> {
        self.last_emitted
    }

    /// 누적 인식 텍스트
    pub fn recognized_text(&self) -> &str {
        &self.recognized_text
    }

    /// 진행 중 윈도우 길이
    pub fn pending_frames(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for SignStream {
    fn default() -> Self {
        Self::new(Box::new(EdgeTrigger))
    }
}
