//! 예측 안정화 전략.
//!
//! 윈도우마다 나오는 원시 예측을 방출할지 결정한다.
//! - [`EdgeTrigger`]: 직전 방출 레이블과 달라질 때만 방출. 신뢰도는 보지 않는다.
//! - [`ConsensusGate`]: 최소 신뢰도를 넘는 같은 레이블이 N개 윈도우 연속으로
//!   나와야 후보가 되고, 그 뒤 엣지 트리거 규칙을 적용한다.

use signtalk_core::config::{RecognitionConfig, StabilizerStrategy};
use signtalk_core::models::label::SignLabel;
use signtalk_core::models::prediction::Prediction;
use tracing::debug;

/// 억제 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// 직전 방출과 같은 레이블
    Repeated,
    /// 최소 신뢰도 미달
    LowConfidence,
    /// 연속 합의 윈도우 수 미달
    AwaitingConsensus,
}

/// 안정화 판정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// 방출
    Emit,
    /// 억제
    Suppress(SuppressReason),
}

/// 안정화 전략 인터페이스
pub trait Stabilizer: Send {
    /// 예측과 직전 방출 레이블로 방출 여부 판정
    fn decide(&mut self, prediction: &Prediction, last_emitted: Option<SignLabel>) -> Decision;

    /// 전략 이름 (로그용)
    fn name(&self) -> &'static str;
}

/// 레이블 변화 엣지 트리거
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeTrigger;

impl Stabilizer for EdgeTrigger {
    fn decide(&mut self, prediction: &Prediction, last_emitted: Option<SignLabel>) -> Decision {
        if last_emitted == Some(prediction.label) {
            Decision::Suppress(SuppressReason::Repeated)
        } else {
            Decision::Emit
        }
    }

    fn name(&self) -> &'static str {
        "edge_trigger"
    }
}

/// 신뢰도 임계값 + 연속 윈도우 합의 게이트
#[derive(Debug, Clone)]
pub struct ConsensusGate {
    min_confidence: f32,
    consensus_windows: usize,
    candidate: Option<SignLabel>,
    streak: usize,
}

impl ConsensusGate {
    /// 새 게이트 생성 (`consensus_windows`는 최소 1)
    pub fn new(min_confidence: f32, consensus_windows: usize) -> Self {
        Self {
            min_confidence,
            consensus_windows: consensus_windows.max(1),
            candidate: None,
            streak: 0,
        }
    }
}

impl Stabilizer for ConsensusGate {
    fn decide(&mut self, prediction: &Prediction, last_emitted: Option<SignLabel>) -> Decision {
        if prediction.confidence < self.min_confidence {
            self.candidate = None;
            self.streak = 0;
            return Decision::Suppress(SuppressReason::LowConfidence);
        }

        if self.candidate == Some(prediction.label) {
            self.streak += 1;
        } else {
            self.candidate = Some(prediction.label);
            self.streak = 1;
        }

        if self.streak < self.consensus_windows {
            return Decision::Suppress(SuppressReason::AwaitingConsensus);
        }

        EdgeTrigger.decide(prediction, last_emitted)
    }

    fn name(&self) -> &'static str {
        "consensus_gate"
    }
}

/// 설정에 따라 안정화 전략 생성
pub fn build_stabilizer(config: &RecognitionConfig) -> Box<dyn Stabilizer> {
    let stabilizer: Box<dyn Stabilizer> = match config.stabilizer {
        StabilizerStrategy::EdgeTrigger => Box::new(EdgeTrigger),
        StabilizerStrategy::ConsensusGate => Box::new(ConsensusGate::new(
            config.min_confidence,
            config.consensus_windows,
        )),
    };
    debug!("안정화 전략: {}", stabilizer.name());
    stabilizer
}
