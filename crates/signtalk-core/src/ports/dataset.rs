//! 학습 데이터셋 저장소 포트.
//!
//! 구현: `signtalk-storage` crate (`DatasetStore`)

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::CoreError;
use crate::models::label::SignLabel;
use crate::models::window::Window;

/// 레이블된 시퀀스 저장소
#[async_trait]
pub trait SequenceRepository: Send + Sync {
    /// 시퀀스 하나 저장 후 저장 경로 반환
    async fn save_sequence(&self, label: SignLabel, window: &Window) -> Result<PathBuf, CoreError>;

    /// 레이블별 저장된 시퀀스 수
    async fn count(&self, label: SignLabel) -> Result<usize, CoreError>;

    /// 저장된 모든 (레이블, 시퀀스): 레이블 열거 순서
    async fn load_all(&self) -> Result<Vec<(SignLabel, Window)>, CoreError>;
}
