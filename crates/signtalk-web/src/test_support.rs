//! 라우터 테스트용 가짜 포트와 요청 헬퍼.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use signtalk_core::config::{DetectMode, RecognitionConfig};
use signtalk_core::error::CoreError;
use signtalk_core::models::label::LABEL_COUNT;
use signtalk_core::models::landmark::{HandDetection, LandmarkPoint, LANDMARK_POINTS};
use signtalk_core::models::window::Window;
use signtalk_core::ports::classifier::SignClassifier;
use signtalk_core::ports::landmarker::HandLandmarker;
use signtalk_recognition::pipeline::SignPipeline;
use signtalk_recognition::session_registry::SessionRegistry;
use std::sync::Arc;

use crate::AppState;

pub const BOUNDARY: &str = "signtalk-test-boundary";

/// 이미지 바이트로 결과를 정하는 추출기
///
/// - `nohand` → 손 없음
/// - `garbage` → `InvalidImage`
/// - 그 외 → 첫 바이트 값을 좌표로 쓰는 손 하나
pub struct FakeLandmarker;

#[async_trait]
impl HandLandmarker for FakeLandmarker {
    async fn detect_hands(&self, image: &[u8]) -> Result<HandDetection, CoreError> {
        match image {
            b"nohand" => Ok(HandDetection::none()),
            b"garbage" => Err(CoreError::InvalidImage("unknown format".to_string())),
            _ => {
                let value = f32::from(image[0]) / 255.0;
                Ok(HandDetection {
                    hands: vec![vec![
                        LandmarkPoint {
                            x: value,
                            y: value,
                            z: value,
                        };
                        LANDMARK_POINTS
                    ]],
                })
            }
        }
    }

    fn provider_name(&self) -> &str {
        "fake"
    }
}

/// 윈도우 첫 스칼라가 0.5 미만이면 'A', 이상이면 'B'에 확률을 몰아주는 분류기
pub struct ThresholdClassifier;

impl SignClassifier for ThresholdClassifier {
    fn predict_proba(&self, window: &Window) -> Result<Vec<f32>, CoreError> {
        let first = window.frames()[0].as_slice()[0];
        let index = usize::from(first >= 0.5);
        let mut probs = vec![0.01; LABEL_COUNT];
        probs[index] = 1.0 - 0.01 * (LABEL_COUNT - 1) as f32;
        Ok(probs)
    }
}

pub fn test_state(mode: DetectMode) -> AppState {
    let pipeline = SignPipeline::new(Arc::new(FakeLandmarker), Arc::new(ThresholdClassifier));
    AppState::new(
        Arc::new(SessionRegistry::new(RecognitionConfig::default())),
        pipeline,
        mode,
    )
}

/// multipart 요청 생성. `image`가 `None`이면 이미지 필드를 넣지 않는다.
pub fn detect_request(session_id: Option<&str>, image: Option<&[u8]>) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    if let Some(id) = session_id {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"sessionId\"\r\n\r\n{id}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"image\"; filename=\"frame.png\"\r\n\
                 Content-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/detect")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
