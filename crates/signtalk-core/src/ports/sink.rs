//! 인식 결과 싱크 포트.
//!
//! 안정화기를 통과한 기호가 방출될 때마다 모든 싱크에 통지된다.
//! 구현: 트랜스크립트 로그(`signtalk-storage`), 음성/오버레이(`signtalk-app`)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::models::label::SignLabel;

/// 방출된 기호
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedSign {
    /// 방출 레이블
    pub label: SignLabel,
    /// 예측 신뢰도
    pub confidence: f32,
    /// 방출 후 누적 인식 텍스트
    pub recognized_text: String,
    /// 방출 시각
    pub emitted_at: DateTime<Utc>,
}

/// 방출 기호 수신자
#[async_trait]
pub trait SignSink: Send + Sync {
    /// 새로 방출된 기호 처리
    async fn on_sign(&self, sign: &EmittedSign) -> Result<(), CoreError>;

    /// 싱크 이름 (로그용)
    fn name(&self) -> &str;
}
