//! 로컬 번역 루프.
//!
//! 프레임 소스 → 파이프라인 → 스트림 → 싱크. 소스가 끝나거나 종료
//! 신호를 받으면 멈추고 최종 인식 텍스트를 돌려준다.

use signtalk_core::error::CoreError;
use signtalk_core::ports::frame_source::FrameSource;
use signtalk_core::ports::sink::SignSink;
use signtalk_recognition::pipeline::{dispatch, FrameOutcome, SignPipeline};
use signtalk_recognition::stream::SignStream;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// 번역 루프 결과 요약
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateSummary {
    /// 처리한 프레임 수
    pub frames: u64,
    /// 손 미검출 프레임 수
    pub no_hand: u64,
    /// 잘못된 이미지로 건너뛴 프레임 수
    pub skipped: u64,
    /// 방출된 기호 수
    pub emitted: u64,
    /// 최종 인식 텍스트
    pub text: String,
}

/// 로컬 번역기
pub struct Translator {
    pipeline: SignPipeline,
    stream: SignStream,
    sinks: Vec<Arc<dyn SignSink>>,
}

impl Translator {
    /// 새 번역기 생성
    pub fn new(pipeline: SignPipeline, stream: SignStream, sinks: Vec<Arc<dyn SignSink>>) -> Self {
        Self {
            pipeline,
            stream,
            sinks,
        }
    }

    /// 소스가 끝나거나 종료 신호가 올 때까지 실행
    pub async fn run(
        mut self,
        source: &mut dyn FrameSource,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<TranslateSummary, CoreError> {
        let mut summary = TranslateSummary::default();
        info!(
            "번역 시작 (싱크: {})",
            self.sinks
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        loop {
            if *shutdown_rx.borrow() {
                info!("번역 루프 종료 신호 수신");
                break;
            }

            let frame = tokio::select! {
                biased;
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        debug!("종료 채널 닫힘");
                        break;
                    }
                    continue;
                }
                frame = source.next_frame() => frame?,
            };
            let Some(frame) = frame else {
                debug!("프레임 소스 종료");
                break;
            };
            summary.frames += 1;

            match self.pipeline.process_frame(&mut self.stream, &frame.data).await {
                Ok(FrameOutcome::NoHand) => summary.no_hand += 1,
                Ok(FrameOutcome::Pending { .. }) => {}
                Ok(FrameOutcome::Classified { emitted, .. }) => {
                    if let Some(sign) = emitted {
                        summary.emitted += 1;
                        dispatch(&self.sinks, &sign).await;
                    }
                }
                Err(e) if e.is_client_error() => {
                    warn!("프레임 #{} 건너뜀: {e}", frame.sequence);
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        summary.text = self.stream.recognized_text().to_string();
        info!(
            "번역 종료: 프레임 {}개, 방출 {}개, 텍스트 \"{}\"",
            summary.frames, summary.emitted, summary.text
        );
        Ok(summary)
    }
}
