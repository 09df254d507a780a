//! 입력 프레임 모델.

use chrono::{DateTime, Utc};

/// 프레임 소스가 전달하는 인코딩된 이미지 한 장
#[derive(Debug, Clone)]
pub struct Frame {
    /// 소스 내 순번 (0부터)
    pub sequence: u64,
    /// 캡처 시각
    pub captured_at: DateTime<Utc>,
    /// 인코딩된 이미지 바이트 (PNG, JPEG 등)
    pub data: Vec<u8>,
}

impl Frame {
    /// 현재 시각으로 프레임 생성
    pub fn new(sequence: u64, data: Vec<u8>) -> Self {
        Self {
            sequence,
            captured_at: Utc::now(),
            data,
        }
    }
}
