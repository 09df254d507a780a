//! 업로드 이미지 검증.
//!
//! 헤더만 읽어 포맷과 크기를 확인한다. 픽셀 디코딩은 추출기 쪽 책임.

use image::{ImageFormat, ImageReader};
use signtalk_core::error::CoreError;
use std::io::Cursor;
use tracing::trace;

/// 검증된 이미지 메타데이터
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// 감지된 포맷
    pub format: ImageFormat,
    /// 너비 (px)
    pub width: u32,
    /// 높이 (px)
    pub height: u32,
}

impl ImageInfo {
    /// 포맷의 MIME 타입
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// 인코딩된 이미지 바이트 검증.
///
/// 빈 입력은 `NoImageProvided`, 포맷을 알 수 없거나 헤더가 깨졌으면 `InvalidImage`.
pub fn inspect(bytes: &[u8]) -> Result<ImageInfo, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::NoImageProvided);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CoreError::InvalidImage(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| CoreError::InvalidImage("알 수 없는 이미지 포맷".to_string()))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| CoreError::InvalidImage(format!("{format:?}: {e}")))?;

    if width == 0 || height == 0 {
        return Err(CoreError::InvalidImage(format!(
            "빈 이미지 크기: {width}x{height}"
        )));
    }

    trace!("이미지 검증: {format:?} {width}x{height}");
    Ok(ImageInfo {
        format,
        width,
        height,
    })
}
