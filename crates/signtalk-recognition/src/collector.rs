//! 학습 시퀀스 수집기.
//!
//! 프레임 소스에서 이미지를 읽어 손 랜드마크를 추출하고, 30프레임이 모일
//! 때마다 레이블된 시퀀스로 저장한다. 손이 없는 프레임은 세지 않는다.

use signtalk_core::error::CoreError;
use signtalk_core::models::label::SignLabel;
use signtalk_core::ports::dataset::SequenceRepository;
use signtalk_core::ports::frame_source::FrameSource;
use signtalk_core::ports::landmarker::HandLandmarker;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::pipeline::extract_first_hand;
use crate::sequence_buffer::{SequenceBuffer, WindowProgress};

/// 수집 결과 요약
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    /// 저장된 시퀀스 경로 (저장 순서)
    pub saved: Vec<PathBuf>,
    /// 읽은 프레임 수
    pub frames_read: u64,
    /// 손 미검출로 건너뛴 프레임 수
    pub frames_skipped: u64,
    /// 소스가 끝나 버려진 미완성 윈도우 길이
    pub discarded_frames: usize,
}

/// 레이블별 시퀀스 수집기
pub struct SequenceCollector {
    landmarker: Arc<dyn HandLandmarker>,
    repository: Arc<dyn SequenceRepository>,
    sequences_per_label: usize,
}

impl SequenceCollector {
    /// 새 수집기 생성
    pub fn new(
        landmarker: Arc<dyn HandLandmarker>,
        repository: Arc<dyn SequenceRepository>,
        sequences_per_label: usize,
    ) -> Self {
        Self {
            landmarker,
            repository,
            sequences_per_label,
        }
    }

    /// `label`의 시퀀스를 레이블당 할당량까지 수집.
    ///
    /// 이미 저장된 시퀀스 수만큼 할당량에서 뺀다. 소스가 먼저 끝나면
    /// 그때까지 저장한 결과를 반환한다.
    pub async fn collect(
        &self,
        label: SignLabel,
        source: &mut dyn FrameSource,
    ) -> Result<CollectReport, CoreError> {
        let existing = self.repository.count(label).await?;
        let wanted = self.sequences_per_label.saturating_sub(existing);
        let mut report = CollectReport::default();

        if wanted == 0 {
            info!(
                "레이블 {label}: 이미 {existing}개 저장됨 (할당량 {}), 수집 생략",
                self.sequences_per_label
            );
            return Ok(report);
        }
        info!("레이블 {label}: 시퀀스 {wanted}개 수집 시작");

        let mut buffer = SequenceBuffer::new();
        while report.saved.len() < wanted {
            let Some(frame) = source.next_frame().await? else {
                break;
            };
            report.frames_read += 1;

            let vector = extract_first_hand(self.landmarker.as_ref(), &frame.data).await?;
            if vector.is_none() {
                report.frames_skipped += 1;
                debug!("프레임 #{}: 손 미검출, 건너뜀", frame.sequence);
                continue;
            }

            if let WindowProgress::Complete(window) = buffer.append(vector) {
                let path = self.repository.save_sequence(label, &window).await?;
                info!(
                    "레이블 {label}: 시퀀스 {}/{wanted} 저장 → {}",
                    report.saved.len() + 1,
                    path.display()
                );
                report.saved.push(path);
            }
        }

        report.discarded_frames = buffer.len();
        if report.saved.len() < wanted {
            warn!(
                "레이블 {label}: 소스 종료로 {}/{wanted}개만 수집 (미완성 프레임 {})",
                report.saved.len(),
                report.discarded_frames
            );
        }
        Ok(report)
    }
}
