//! 수어 검출 핸들러.
//!
//! multipart 요청(`sessionId` 텍스트 + `image` 파일)을 받아 세션 검증 →
//! 이미지 검증 → 랜드마크 추출 → 분류 순서로 처리한다.
//!
//! - `snapshot` 모드: 벡터 하나를 30번 복제해 즉시 분류. 호출 간 디바운스 없음.
//! - `streaming` 모드: 세션 스트림에 프레임을 쌓고, 윈도우가 완성될 때만 분류.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use signtalk_core::config::DetectMode;
use signtalk_core::models::prediction::Prediction;
use signtalk_recognition::pipeline::FrameOutcome;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// 검출 응답 DTO
#[derive(Debug, Default, Serialize)]
pub struct DetectResponse {
    /// 손 미검출 시 "No hand detected"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// 검출된 기호 (`sign`, `confidence`)
    pub detected: Vec<Prediction>,
    /// streaming 모드에서 진행 중 윈도우 프레임 수
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<usize>,
}

impl DetectResponse {
    fn no_hand() -> Self {
        Self {
            error: Some("No hand detected"),
            ..Default::default()
        }
    }

    fn detected(prediction: Prediction) -> Self {
        Self {
            detected: vec![prediction],
            ..Default::default()
        }
    }
}

/// 업로드 필드
#[derive(Default)]
struct DetectUpload {
    session_id: Option<String>,
    image: Option<Vec<u8>>,
}

async fn read_upload(mut multipart: Multipart) -> Result<DetectUpload, ApiError> {
    let mut upload = DetectUpload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("sessionId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                upload.session_id = Some(text);
            }
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                upload.image = Some(bytes.to_vec());
            }
            _ => {}
        }
    }
    Ok(upload)
}

/// 프레임 한 장 검출
///
/// POST /detect (multipart: `sessionId`, `image`)
pub async fn detect(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DetectResponse>, ApiError> {
    // multipart가 아니면 sessionId 필드도 없는 것으로 본다
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await?,
        Err(_) => DetectUpload::default(),
    };

    let session_id = upload.session_id.ok_or(ApiError::InvalidSession)?;
    // 존재 확인 + 활동 시각 갱신
    state.registry.with_stream(&session_id, |_| ())?;

    let image = upload
        .image
        .filter(|bytes| !bytes.is_empty())
        .ok_or(ApiError::NoImageProvided)?;

    let Some(vector) = state.pipeline.extract(&image).await? else {
        debug!("세션 {session_id}: 손 미검출");
        return Ok(Json(DetectResponse::no_hand()));
    };

    let response = match state.detect_mode {
        DetectMode::Snapshot => {
            let prediction = state.pipeline.classify_snapshot(&vector)?;
            debug!(
                "세션 {session_id}: {} ({:.3})",
                prediction.label, prediction.confidence
            );
            DetectResponse::detected(prediction)
        }
        DetectMode::Streaming => {
            let outcome = state
                .registry
                .with_stream(&session_id, |stream| state.pipeline.feed(stream, Some(vector)))??;
            match outcome {
                FrameOutcome::Classified {
                    emitted: Some(sign),
                    ..
                } => DetectResponse::detected(Prediction {
                    label: sign.label,
                    confidence: sign.confidence,
                }),
                FrameOutcome::Classified { emitted: None, .. } => DetectResponse::default(),
                FrameOutcome::Pending { filled } => DetectResponse {
                    pending: Some(filled),
                    ..Default::default()
                },
                FrameOutcome::NoHand => DetectResponse::no_hand(),
            }
        }
    };

    Ok(Json(response))
}
