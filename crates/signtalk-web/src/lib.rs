//! # signtalk-web
//!
//! HTTP 검출 서버.
//! Axum 기반 REST API + 정적 파일 서빙.
//!
//! ## 기능
//! - 세션 발급/시작/종료/조회
//! - 이미지 한 장 단위 수어 검출 (snapshot / streaming)
//! - 유휴 세션 만료 스윕
//! - 정적 파일 서빙 (`/` → `index.html`)

pub mod error;
pub mod handlers;
pub mod routes;
pub mod sweeper;

#[cfg(test)]
pub(crate) mod test_support;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use signtalk_core::config::{DetectMode, SessionConfig, WebConfig};
use signtalk_recognition::pipeline::SignPipeline;
use signtalk_recognition::session_registry::SessionRegistry;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::ApiError;
use crate::sweeper::SweeperGuard;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 세션 레지스트리
    pub registry: Arc<SessionRegistry>,
    /// 추출기 + 분류기
    pub pipeline: SignPipeline,
    /// 검출 모드
    pub detect_mode: DetectMode,
}

impl AppState {
    /// 새 상태 생성
    pub fn new(
        registry: Arc<SessionRegistry>,
        pipeline: SignPipeline,
        detect_mode: DetectMode,
    ) -> Self {
        Self {
            registry,
            pipeline,
            detect_mode,
        }
    }
}

/// 라우터 구성 (API + 정적 파일 + 공통 레이어)
pub fn build_router(state: AppState, config: &WebConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = routes::api_routes().layer(DefaultBodyLimit::max(config.max_upload_bytes));
    let router = match &config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.fallback(not_found),
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// HTTP 검출 서버
pub struct WebServer {
    config: WebConfig,
    session: SessionConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(config: WebConfig, state: AppState) -> Self {
        Self {
            config,
            session: SessionConfig::default(),
            state,
        }
    }

    /// 세션 만료 설정
    pub fn with_session_config(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// 서버 실행
    ///
    /// 설정된 포트 하나에만 바인드한다. 포트가 사용 중이면 `AddrInUse`를
    /// 그대로 반환한다. 실행 동안 세션 만료 스윕 태스크를 함께 돌린다.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let addr = self.bind_addr();
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("검출 서버 바인드 실패 {addr}: {e}");
                return Err(e);
            }
        };
        info!("검출 서버 시작: http://{}", listener.local_addr()?);

        let registry = self.state.registry.clone();
        let app = build_router(self.state, &self.config);

        let _sweeper = SweeperGuard::new(sweeper::spawn_session_sweeper(
            registry,
            self.session.ttl(),
            self.session.sweep_interval(),
            shutdown_rx.clone(),
        ));

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("웹 서버 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("검출 서버 종료");
        Ok(())
    }

    fn bind_addr(&self) -> SocketAddr {
        let host = if self.config.allow_external {
            Ipv4Addr::UNSPECIFIED
        } else {
            Ipv4Addr::LOCALHOST
        };
        SocketAddr::from((host, self.config.port))
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}
