//! 디렉토리 프레임 소스.
//!
//! 녹화된 프레임 이미지가 담긴 디렉토리를 캡처 순서로 재생한다.
//! 파일 이름 속 숫자는 값으로 비교한다 (`frame_2` < `frame_10`).
//! 카메라 캡처 대신 수집/번역 루프의 입력으로 쓰인다.

use async_trait::async_trait;
use signtalk_core::error::CoreError;
use signtalk_core::models::frame::Frame;
use signtalk_core::ports::frame_source::FrameSource;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 프레임으로 인식하는 확장자
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

/// 디렉토리 기반 프레임 소스
#[derive(Debug)]
pub struct ImageDirSource {
    files: Vec<PathBuf>,
    cursor: usize,
}

impl ImageDirSource {
    /// 디렉토리의 이미지 파일 목록으로 소스 생성
    pub async fn open(dir: &Path) -> Result<Self, CoreError> {
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            CoreError::Config(format!("프레임 디렉토리 열기 실패 ({}): {e}", dir.display()))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_file() && is_image(&path) {
                files.push(path);
            }
        }
        files.sort_by_cached_key(|path| (natural_key(path), path.clone()));

        info!("프레임 소스: {} ({}개 이미지)", dir.display(), files.len());
        Ok(Self { files, cursor: 0 })
    }

    /// 남은 프레임 수
    pub fn remaining(&self) -> usize {
        self.files.len() - self.cursor
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// 파일 이름 정렬 단위. 숫자 묶음은 자릿수, 값 순으로 비교한다.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NameChunk {
    Number { digits: usize, value: String },
    Text(String),
}

fn natural_key(path: &Path) -> Vec<NameChunk> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut chunks = Vec::new();
    let mut chars = name.chars().peekable();
    while let Some(&first) = chars.peek() {
        let numeric = first.is_ascii_digit();
        let mut run = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() != numeric {
                break;
            }
            run.push(c);
            chars.next();
        }

        chunks.push(if numeric {
            let value = run.trim_start_matches('0').to_string();
            NameChunk::Number {
                digits: value.len(),
                value,
            }
        } else {
            NameChunk::Text(run)
        });
    }
    chunks
}

#[async_trait]
impl FrameSource for ImageDirSource {
    async fn next_frame(&mut self) -> Result<Option<Frame>, CoreError> {
        let Some(path) = self.files.get(self.cursor) else {
            return Ok(None);
        };
        let data = tokio::fs::read(path).await?;
        let sequence = self.cursor as u64;
        self.cursor += 1;

        debug!("프레임 #{sequence}: {}", path.display());
        Ok(Some(Frame::new(sequence, data)))
    }
}
