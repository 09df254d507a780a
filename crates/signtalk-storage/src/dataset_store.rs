//! 학습 데이터셋 파일 저장소.
//!
//! 구조: `<dataset_dir>/<LABEL>/<LABEL>_<n>.json`
//! 각 파일은 30 × 63 스칼라 배열(JSON) 하나. 레이블 폴더는 A–Z 전부 미리 만든다.

use async_trait::async_trait;
use signtalk_core::error::CoreError;
use signtalk_core::models::label::SignLabel;
use signtalk_core::models::window::Window;
use signtalk_core::ports::dataset::SequenceRepository;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// 레이블별 폴더 기반 시퀀스 저장소
#[derive(Debug, Clone)]
pub struct DatasetStore {
    base_dir: PathBuf,
}

impl DatasetStore {
    /// 저장소 열기. 레이블 폴더가 없으면 만든다.
    pub async fn open(base_dir: PathBuf) -> Result<Self, CoreError> {
        for label in SignLabel::all() {
            fs::create_dir_all(base_dir.join(label.to_string()))
                .await
                .map_err(|e| CoreError::Dataset(format!("레이블 폴더 생성 실패: {e}")))?;
        }
        info!("데이터셋 저장소: {}", base_dir.display());
        Ok(Self { base_dir })
    }

    /// 데이터셋 루트 디렉토리
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn label_dir(&self, label: SignLabel) -> PathBuf {
        self.base_dir.join(label.to_string())
    }

    /// 레이블 폴더의 시퀀스 파일 목록 (번호 순)
    async fn sequence_files(&self, label: SignLabel) -> Result<Vec<(u32, PathBuf)>, CoreError> {
        let dir = self.label_dir(label);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let prefix = format!("{label}_");
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let index = path
                .file_stem()
                .and_then(|s| s.to_str())
                .filter(|_| path.extension().is_some_and(|ext| ext == "json"))
                .and_then(|stem| stem.strip_prefix(&prefix))
                .and_then(|n| n.parse::<u32>().ok());
            if let Some(index) = index {
                files.push((index, path));
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl SequenceRepository for DatasetStore {
    async fn save_sequence(&self, label: SignLabel, window: &Window) -> Result<PathBuf, CoreError> {
        let dir = self.label_dir(label);
        fs::create_dir_all(&dir).await?;
        let content = serde_json::to_vec(window)?;

        let mut index = self
            .sequence_files(label)
            .await?
            .last()
            .map(|(n, _)| n + 1)
            .unwrap_or(0);

        // 동시 저장 시 이름 충돌하면 다음 번호로
        loop {
            let path = dir.join(format!("{label}_{index}.json"));
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(&content).await?;
                    file.flush().await?;
                    debug!("시퀀스 저장: {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => index += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn count(&self, label: SignLabel) -> Result<usize, CoreError> {
        Ok(self.sequence_files(label).await?.len())
    }

    async fn load_all(&self) -> Result<Vec<(SignLabel, Window)>, CoreError> {
        let mut samples = Vec::new();
        for label in SignLabel::all() {
            for (_, path) in self.sequence_files(label).await? {
                let bytes = fs::read(&path).await?;
                let window: Window = serde_json::from_slice(&bytes).map_err(|e| {
                    CoreError::Dataset(format!("시퀀스 파일 손상 ({}): {e}", path.display()))
                })?;
                samples.push((label, window));
            }
        }

        if samples.is_empty() {
            warn!("데이터셋 비어 있음: {}", self.base_dir.display());
        } else {
            info!("데이터셋 로드: 시퀀스 {}개", samples.len());
        }
        Ok(samples)
    }
}
