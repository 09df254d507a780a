//! API 에러 처리.
//!
//! 클라이언트가 의존하는 에러 문자열(`Unauthorized`, `Invalid session`,
//! `No image provided`, `Invalid image`)은 그대로 본문 `error` 필드에 담는다.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use signtalk_core::error::CoreError;
use thiserror::Error;
use tracing::{debug, error, warn};

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 자격증명 누락/형식 오류
    #[error("Unauthorized")]
    Unauthorized,

    /// 알 수 없는 세션
    #[error("Invalid session")]
    InvalidSession,

    /// 이미지 필드 누락
    #[error("No image provided")]
    NoImageProvided,

    /// 디코딩할 수 없는 이미지
    #[error("Invalid image")]
    InvalidImage,

    /// 잘못된 요청
    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    /// 라우트/정적 파일 없음
    #[error("Not found")]
    NotFound,

    /// 랜드마크 서비스 실패
    #[error("랜드마크 서비스 오류: {0}")]
    Upstream(String),

    /// 내부 서버 오류
    #[error("내부 서버 오류: {0}")]
    Internal(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 에러 메시지
    pub error: String,
}

impl ApiError {
    /// HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidSession
            | ApiError::NoImageProvided
            | ApiError::InvalidImage
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, "{self}");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unauthorized(reason) => {
                debug!("인증 거부: {reason}");
                ApiError::Unauthorized
            }
            CoreError::InvalidSession { .. } => ApiError::InvalidSession,
            CoreError::NoImageProvided => ApiError::NoImageProvided,
            CoreError::InvalidImage(reason) => {
                debug!("이미지 거부: {reason}");
                ApiError::InvalidImage
            }
            // 추출기가 21개가 아닌 포인트를 돌려준 경우
            CoreError::ShapeMismatch { .. } | CoreError::Landmark(_) => {
                warn!("랜드마크 추출 실패: {err}");
                ApiError::Upstream(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
