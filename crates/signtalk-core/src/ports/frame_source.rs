//! 프레임 소스 포트.
//!
//! 구현: `signtalk-vision` crate (`ImageDirSource`)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::frame::Frame;

/// 순차 프레임 공급자 (카메라, 녹화된 프레임 디렉토리 등)
#[async_trait]
pub trait FrameSource: Send {
    /// 다음 프레임. 소스가 끝나면 `None`.
    async fn next_frame(&mut self) -> Result<Option<Frame>, CoreError>;
}
