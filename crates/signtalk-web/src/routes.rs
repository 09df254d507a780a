//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // 인증
        .route("/auth", post(handlers::auth::authorize))
        // 세션 수명
        .route("/sessions", post(handlers::sessions::start_session))
        .route(
            "/sessions/{id}",
            get(handlers::sessions::get_session).delete(handlers::sessions::end_session),
        )
        // 검출
        .route("/detect", post(handlers::detect::detect))
        // 상태
        .route("/health", get(handlers::health::health))
}
