//! 원격 손 랜드마크 추출기.
//!
//! 손 랜드마크 모델을 띄운 외부 HTTP 서비스에 이미지를 보내고
//! 손별 포인트 목록을 받는다.
//!
//! 요청: `POST {endpoint}`: 본문은 인코딩된 이미지 바이트, `Content-Type`은 감지된 MIME.
//! 응답: `{"hands": [[{"x":..,"y":..,"z":..}, ... 21개], ...]}`: 손이 없으면 빈 배열.

use async_trait::async_trait;
use reqwest::StatusCode;
use signtalk_core::config::LandmarkerConfig;
use signtalk_core::error::CoreError;
use signtalk_core::models::landmark::HandDetection;
use signtalk_core::ports::landmarker::HandLandmarker;
use std::time::Duration;
use tracing::{debug, warn};

use crate::image_check;

/// HTTP 랜드마크 서비스 클라이언트
#[derive(Debug, Clone)]
pub struct RemoteLandmarker {
    http_client: reqwest::Client,
    endpoint: String,
}

impl RemoteLandmarker {
    /// 설정으로 클라이언트 생성
    pub fn new(config: &LandmarkerConfig) -> Result<Self, CoreError> {
        if config.endpoint.trim().is_empty() {
            return Err(CoreError::Config("랜드마크 엔드포인트 미설정".into()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms.max(1)))
            .build()
            .map_err(|e| CoreError::Landmark(format!("HTTP 클라이언트 생성 실패: {e}")))?;

        debug!(
            endpoint = %config.endpoint,
            timeout_ms = config.timeout_ms,
            "RemoteLandmarker 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// 요청 대상 URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse_response(body: &str) -> Result<HandDetection, CoreError> {
        serde_json::from_str(body)
            .map_err(|e| CoreError::Landmark(format!("응답 JSON 파싱 실패: {e}")))
    }
}

#[async_trait]
impl HandLandmarker for RemoteLandmarker {
    async fn detect_hands(&self, image: &[u8]) -> Result<HandDetection, CoreError> {
        let info = image_check::inspect(image)?;

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, info.mime_type())
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| CoreError::Landmark(format!("랜드마크 서비스 호출 실패: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Landmark(format!("랜드마크 응답 읽기 실패: {e}")))?;

        if !status.is_success() {
            let snippet: String = body.chars().take(200).collect();
            warn!(status = %status, "랜드마크 서비스 오류 응답");
            return Err(match status {
                StatusCode::BAD_REQUEST
                | StatusCode::UNSUPPORTED_MEDIA_TYPE
                | StatusCode::UNPROCESSABLE_ENTITY => CoreError::InvalidImage(snippet),
                _ => CoreError::Landmark(format!("랜드마크 서비스 오류 ({status}): {snippet}")),
            });
        }

        let detection = Self::parse_response(&body)?;
        debug!(
            hands = detection.hands.len(),
            width = info.width,
            height = info.height,
            "랜드마크 수신"
        );
        Ok(detection)
    }

    fn provider_name(&self) -> &str {
        "remote"
    }
}
