//! 인증 API 핸들러.

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::AppState;

/// 인증 응답 DTO
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// 발급된 세션 ID
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// 세션 발급
///
/// POST /auth (`Authorization: Bearer …`)
pub async fn authorize(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthResponse>, ApiError> {
    let credential = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let session_id = state.registry.authorize(credential)?;
    Ok(Json(AuthResponse { session_id }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_uses_camel_case_key() {
        let json = serde_json::to_string(&AuthResponse {
            session_id: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"sessionId":"abc"}"#);
    }
}
