//! 세션 레지스트리.
//!
//! 세션 ID → 세션 레코드 맵을 소유한다. 맵은 `RwLock`으로 조회/삽입 때만
//! 잠그고, 세션별 상태 변경은 레코드의 `Mutex`로 직렬화한다.
//! 잠금 순서: 맵 → 레코드. 레코드 잠금을 쥔 채 맵을 잠그지 않는다.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use signtalk_core::config::RecognitionConfig;
use signtalk_core::error::CoreError;
use signtalk_core::models::session::{SessionInfo, SessionState};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::stream::SignStream;

const BEARER_PREFIX: &str = "Bearer";

/// 세션 하나의 상태
pub struct SessionRecord {
    id: String,
    state: SessionState,
    active: bool,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
    stream: SignStream,
}

impl SessionRecord {
    fn new(id: String, stream: SignStream) -> Self {
        let now = Utc::now();
        Self {
            id,
            state: SessionState::Authorized,
            active: true,
            created_at: now,
            last_active_at: now,
            stream,
        }
    }

    fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.id.clone(),
            state: self.state,
            active: self.active,
            created_at: self.created_at,
            last_active_at: self.last_active_at,
            recognized_text: self.stream.recognized_text().to_string(),
            pending_frames: self.stream.pending_frames(),
        }
    }

    fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        // 미래 시각(시계 역행)은 만료로 보지 않음
        (now - self.last_active_at)
            .to_std()
            .map(|idle| idle > ttl)
            .unwrap_or(false)
    }
}

/// 세션 레지스트리
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<SessionRecord>>>>,
    recognition: RecognitionConfig,
}

impl SessionRegistry {
    /// 새 레지스트리 생성. 세션 스트림은 `recognition` 설정의 안정화 전략을 쓴다.
    pub fn new(recognition: RecognitionConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            recognition,
        }
    }

    /// 자격증명 확인 후 새 세션 발급.
    ///
    /// 자격증명이 없거나 `Bearer`로 시작하지 않으면 `Unauthorized`.
    pub fn authorize(&self, credential: Option<&str>) -> Result<String, CoreError> {
        match credential {
            Some(value) if value.starts_with(BEARER_PREFIX) => {}
            Some(_) => {
                return Err(CoreError::Unauthorized(
                    "Bearer 자격증명이 아님".to_string(),
                ))
            }
            None => return Err(CoreError::Unauthorized("자격증명 없음".to_string())),
        }

        let id = Uuid::new_v4().to_string();
        let record = SessionRecord::new(id.clone(), SignStream::from_config(&self.recognition));
        self.sessions
            .write()
            .insert(id.clone(), Arc::new(Mutex::new(record)));

        info!("세션 발급: {id}");
        Ok(id)
    }

    /// 세션 시작 (멱등). 어떤 상태에서든 STARTED로 옮긴다.
    /// 종료된 세션도 받아들이되 `active`는 되돌리지 않고, 스트림도 초기화하지 않는다.
    pub fn start(&self, id: &str) -> Result<SessionInfo, CoreError> {
        let record = self.lookup(id)?;
        let mut record = record.lock();
        record.state = SessionState::Started;
        record.touch();
        debug!("세션 시작: {id} ({:?})", record.state);
        Ok(record.info())
    }

    /// 세션 종료 (멱등). 레코드와 스트림은 만료 스윕 전까지 남는다.
    pub fn end(&self, id: &str) -> Result<SessionInfo, CoreError> {
        let record = self.lookup(id)?;
        let mut record = record.lock();
        if record.active {
            info!("세션 종료: {id} (인식 텍스트 \"{}\")", record.stream.recognized_text());
        }
        record.state = SessionState::Ended;
        record.active = false;
        record.touch();
        Ok(record.info())
    }

    /// 세션 스냅샷 조회
    pub fn info(&self, id: &str) -> Result<SessionInfo, CoreError> {
        let record = self.lookup(id)?;
        let record = record.lock();
        Ok(record.info())
    }

    /// 세션 스트림에 대해 동기 작업 실행. 세션 잠금 안에서 실행되므로
    /// `f`는 블로킹/await 없이 끝나야 한다.
    pub fn with_stream<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut SignStream) -> R,
    ) -> Result<R, CoreError> {
        let record = self.lookup(id)?;
        let mut record = record.lock();
        record.touch();
        Ok(f(&mut record.stream))
    }

    /// 세션 존재 여부
    pub fn contains(&self, id: &str) -> bool {
        self.sessions.read().contains_key(id)
    }

    /// 등록된 세션 수 (종료된 세션 포함)
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// 세션이 하나도 없는지
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// 마지막 활동 후 `ttl`을 넘긴 세션 제거. 제거된 수 반환.
    pub fn reap_expired(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|id, record| {
            let expired = record.lock().is_idle(now, ttl);
            if expired {
                debug!("세션 만료: {id}");
            }
            !expired
        });
        let removed = before - sessions.len();
        if removed > 0 {
            info!("만료 세션 {removed}개 제거 (남은 세션 {})", sessions.len());
        }
        removed
    }

    fn lookup(&self, id: &str) -> Result<Arc<Mutex<SessionRecord>>, CoreError> {
        self.sessions
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::invalid_session(id))
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(RecognitionConfig::default())
    }
}
