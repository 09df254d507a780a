//! API 핸들러 모듈.

pub mod auth;
pub mod detect;
pub mod health;
pub mod sessions;

use serde::Serialize;

/// 상태 문자열만 담는 응답
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// 상태
    pub status: &'static str,
}
