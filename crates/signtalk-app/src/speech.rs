//! 음성 출력.
//!
//! 외부 TTS 명령(기본 `espeak`)으로 방출된 글자를 읽는다.

use async_trait::async_trait;
use signtalk_core::config::SpeechConfig;
use signtalk_core::error::CoreError;
use signtalk_core::ports::sink::{EmittedSign, SignSink};
use signtalk_core::ports::speech::SpeechSynthesizer;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

/// espeak 진폭 상한 (`-a 0..=200`)
const MAX_AMPLITUDE: f32 = 200.0;

/// 외부 명령 기반 음성 합성기
pub struct CommandSpeaker {
    command: String,
    rate: u32,
    volume: f32,
}

impl CommandSpeaker {
    /// 설정에서 생성
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self {
            command: config.command.clone(),
            rate: config.rate,
            volume: config.volume,
        }
    }

    /// 명령 인자 (`-s <rate> -a <amplitude> <text>`)
    fn args(&self, text: &str) -> Vec<String> {
        let amplitude = (self.volume.clamp(0.0, 1.0) * MAX_AMPLITUDE).round() as u32;
        vec![
            "-s".to_string(),
            self.rate.to_string(),
            "-a".to_string(),
            amplitude.to_string(),
            text.to_string(),
        ]
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSpeaker {
    async fn speak(&self, text: &str) -> Result<(), CoreError> {
        debug!("음성 출력: {text}");
        let status = Command::new(&self.command)
            .args(self.args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| CoreError::Speech(format!("{} 실행 실패: {e}", self.command)))?;

        if status.success() {
            Ok(())
        } else {
            Err(CoreError::Speech(format!("{} 종료 코드: {status}", self.command)))
        }
    }
}

/// 방출된 글자를 읽는 싱크
pub struct SpeechSink {
    speaker: Arc<dyn SpeechSynthesizer>,
}

impl SpeechSink {
    /// 새 싱크 생성
    pub fn new(speaker: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { speaker }
    }
}

#[async_trait]
impl SignSink for SpeechSink {
    async fn on_sign(&self, sign: &EmittedSign) -> Result<(), CoreError> {
        self.speaker.speak(&sign.label.to_string()).await
    }

    fn name(&self) -> &str {
        "speech"
    }
}
