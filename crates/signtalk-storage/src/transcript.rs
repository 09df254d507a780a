//! 인식 기록 로그.
//!
//! 열 때마다 `--- SESSION STARTED: <시각> ---` 헤더를 남기고,
//! 방출된 글자를 하나씩 덧붙인다. 글자마다 flush 하므로 중단되어도
//! 그때까지의 기록은 남는다.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use signtalk_core::error::CoreError;
use signtalk_core::ports::sink::{EmittedSign, SignSink};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// 세션 헤더 한 줄
pub fn session_header(started_at: DateTime<Local>) -> String {
    format!(
        "\n--- SESSION STARTED: {} ---\n",
        started_at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// 추가 전용 인식 기록 파일
pub struct TranscriptLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl TranscriptLog {
    /// 기록 파일을 추가 모드로 열고 세션 헤더 기록
    pub async fn open(path: &Path) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(session_header(Local::now()).as_bytes())
            .await?;
        file.flush().await?;

        info!("인식 기록 시작: {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// 기록 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 글자 하나 기록 후 flush
    pub async fn append(&self, letter: char) -> Result<(), CoreError> {
        let mut buf = [0u8; 4];
        let mut file = self.file.lock().await;
        file.write_all(letter.encode_utf8(&mut buf).as_bytes())
            .await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl SignSink for TranscriptLog {
    async fn on_sign(&self, sign: &EmittedSign) -> Result<(), CoreError> {
        self.append(sign.label.as_char()).await?;
        debug!("기록: {}", sign.label);
        Ok(())
    }

    fn name(&self) -> &str {
        "transcript"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use signtalk_core::models::label::SignLabel;
    use tempfile::TempDir;

    fn sign(c: char) -> EmittedSign {
        EmittedSign {
            label: SignLabel::from_char(c).unwrap(),
            confidence: 0.9,
            recognized_text: c.to_string(),
            emitted_at: Utc::now(),
        }
    }

    #[test]
    fn header_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            session_header(at),
            "\n--- SESSION STARTED: 2024-03-09 14:05:07 ---\n"
        );
    }

    #[tokio::test]
    async fn writes_header_then_letters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("output_log.txt");

        let log = TranscriptLog::open(&path).await.unwrap();
        for c in ['H', 'I'] {
            log.on_sign(&sign(c)).await.unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("\n--- SESSION STARTED: "));
        assert!(content.ends_with(" ---\nHI"));
        assert_eq!(log.name(), "transcript");
    }

    #[tokio::test]
    async fn reopening_appends_new_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output_log.txt");

        TranscriptLog::open(&path).await.unwrap().append('A').await.unwrap();
        TranscriptLog::open(&path).await.unwrap().append('B').await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("SESSION STARTED").count(), 2);
        assert!(content.contains(" ---\nA\n--- SESSION STARTED: "));
        assert!(content.ends_with(" ---\nB"));
    }
}
