//! 헬스 체크 핸들러.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

/// 헬스 응답 DTO
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 항상 "ok"
    pub status: &'static str,
    /// 등록된 세션 수 (종료된 세션 포함)
    pub sessions: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.registry.len(),
    })
}
