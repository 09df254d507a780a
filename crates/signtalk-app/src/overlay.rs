//! 인식 텍스트 오버레이.
//!
//! 화면 대신 로그로 누적 인식 텍스트를 보여준다.

use async_trait::async_trait;
use signtalk_core::error::CoreError;
use signtalk_core::ports::sink::{EmittedSign, SignSink};
use tracing::info;

/// 누적 인식 텍스트 표시 싱크
#[derive(Debug, Default)]
pub struct OverlaySink;

impl OverlaySink {
    pub fn new() -> Self {
        Self
    }

    fn render(sign: &EmittedSign) -> String {
        format!(
            "[{}] {:.0}% | {}",
            sign.label,
            sign.confidence * 100.0,
            sign.recognized_text
        )
    }
}

#[async_trait]
impl SignSink for OverlaySink {
    async fn on_sign(&self, sign: &EmittedSign) -> Result<(), CoreError> {
        info!("{}", Self::render(sign));
        Ok(())
    }

    fn name(&self) -> &str {
        "overlay"
    }
}
