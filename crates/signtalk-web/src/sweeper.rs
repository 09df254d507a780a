//! 세션 만료 스윕 태스크.
//!
//! 주기적으로 레지스트리에서 유휴 세션을 제거한다. 요청 핸들러 안에서는
//! 돌지 않는다.

use chrono::Utc;
use signtalk_recognition::session_registry::SessionRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// 스윕 태스크 시작. 종료 신호를 받으면 끝난다.
pub fn spawn_session_sweeper(
    registry: Arc<SessionRegistry>,
    ttl: Duration,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "세션 만료 스윕 시작 (TTL {}초, 주기 {}초)",
            ttl.as_secs(),
            interval.as_secs()
        );
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // 첫 tick은 즉시 완료됨
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    registry.reap_expired(Utc::now(), ttl);
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("세션 만료 스윕 종료");
    })
}

/// 스코프를 벗어나면 스윕 태스크를 중단시키는 핸들.
///
/// 서버가 정상 종료하든 에러로 끝나든 스윕 태스크가 남지 않는다.
#[derive(Debug)]
pub struct SweeperGuard {
    handle: JoinHandle<()>,
}

impl SweeperGuard {
    /// 스윕 태스크 핸들을 감싼다
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }
}

impl Drop for SweeperGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
