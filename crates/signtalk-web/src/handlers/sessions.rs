//! 세션 API 핸들러.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use signtalk_core::models::session::{SessionInfo, SessionState};

use super::StatusResponse;
use crate::error::ApiError;
use crate::AppState;

/// 세션 시작 요청 본문
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// 인증 시 받은 세션 ID
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// 세션 시작 응답 DTO
#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    /// 세션 ID
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// 항상 "started"
    pub status: &'static str,
}

/// 세션 조회 응답 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// 세션 ID
    pub session_id: String,
    /// 상태 (AUTHORIZED / STARTED / ENDED)
    pub state: SessionState,
    /// 활성 여부
    pub active: bool,
    /// 생성 시각 (RFC3339)
    pub created_at: String,
    /// 마지막 활동 시각 (RFC3339)
    pub last_active_at: String,
    /// 누적 인식 텍스트
    pub recognized_text: String,
    /// 진행 중 윈도우 프레임 수
    pub pending_frames: usize,
}

impl From<SessionInfo> for SessionResponse {
    fn from(info: SessionInfo) -> Self {
        Self {
            session_id: info.session_id,
            state: info.state,
            active: info.active,
            created_at: info.created_at.to_rfc3339(),
            last_active_at: info.last_active_at.to_rfc3339(),
            recognized_text: info.recognized_text,
            pending_frames: info.pending_frames,
        }
    }
}

/// 세션 시작
///
/// POST /sessions `{"sessionId": …}`
pub async fn start_session(
    State(state): State<AppState>,
    body: Result<Json<StartSessionRequest>, JsonRejection>,
) -> Result<Json<StartSessionResponse>, ApiError> {
    // 본문이 없거나 깨졌으면 세션 ID가 없는 것과 같다
    let session_id = body
        .ok()
        .and_then(|Json(req)| req.session_id)
        .ok_or(ApiError::InvalidSession)?;

    state.registry.start(&session_id)?;
    Ok(Json(StartSessionResponse {
        session_id,
        status: "started",
    }))
}

/// 세션 종료 (멱등)
///
/// DELETE /sessions/{id}
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.registry.end(&id)?;
    Ok(Json(StatusResponse { status: "ended" }))
}

/// 세션 조회
///
/// GET /sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let info = state.registry.info(&id)?;
    Ok(Json(info.into()))
}
