//! 세션 모델.
//!
//! 클라이언트 세션의 수명 상태와 조회용 스냅샷을 표현.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 세션 상태 (`Authorized → Started → Ended`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// 인증 직후: 스트림은 비어 있음
    Authorized,
    /// 시작 요청 수신
    Started,
    /// 종료됨 (active=false). 스트림은 만료 스윕 전까지 유지
    Ended,
}

/// 세션 조회 스냅샷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// 세션 고유 ID
    pub session_id: String,
    /// 현재 상태
    pub state: SessionState,
    /// 활성 여부 (종료 시 false)
    pub active: bool,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
    /// 마지막 활동 시각
    pub last_active_at: DateTime<Utc>,
    /// 지금까지 인식된 텍스트
    pub recognized_text: String,
    /// 진행 중 윈도우에 쌓인 프레임 수
    pub pending_frames: usize,
}
