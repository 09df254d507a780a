//! 손 랜드마크 추출 포트.
//!
//! 구현: `signtalk-vision` crate (`RemoteLandmarker`)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::landmark::HandDetection;

/// 이미지 → 손별 랜드마크 포인트 추출기
#[async_trait]
pub trait HandLandmarker: Send + Sync {
    /// 인코딩된 이미지 한 장에서 손 랜드마크 추출.
    ///
    /// 손이 없으면 빈 `HandDetection`을 반환한다 (에러 아님).
    async fn detect_hands(&self, image: &[u8]) -> Result<HandDetection, CoreError>;

    /// 추출기 이름 (로그용)
    fn provider_name(&self) -> &str;
}
