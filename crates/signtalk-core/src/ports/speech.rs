//! 음성 합성 포트.
//!
//! 구현: `signtalk-app` crate (`CommandSpeaker`)

use async_trait::async_trait;

use crate::error::CoreError;

/// 텍스트 → 음성 출력
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// 텍스트를 읽고 재생이 끝날 때까지 대기
    async fn speak(&self, text: &str) -> Result<(), CoreError>;
}
