//! 중심점(centroid) 분류기.
//!
//! 레이블별 평균 윈도우(30 × 63 평탄화)를 학습하고, 입력 윈도우와의
//! 제곱 거리에 대한 softmax로 26개 확률을 낸다. 학습 데이터가 없는
//! 레이블의 확률은 0이다. 모델은 JSON 파일로 저장/로드한다.

use serde::{Deserialize, Serialize};
use signtalk_core::error::CoreError;
use signtalk_core::models::label::{SignLabel, LABEL_COUNT};
use signtalk_core::models::landmark::VECTOR_LEN;
use signtalk_core::models::window::{Window, SEQUENCE_LENGTH};
use signtalk_core::ports::classifier::SignClassifier;
use std::path::Path;
use tracing::{debug, info};

const FEATURE_LEN: usize = SEQUENCE_LENGTH * VECTOR_LEN;

/// 레이블 하나의 학습 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Centroid {
    label: SignLabel,
    samples: usize,
    mean: Vec<f32>,
}

/// 레이블별 평균 윈도우 기반 분류기
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentroidClassifier {
    /// softmax 온도 (평균 제곱 거리 스케일)
    temperature: f32,
    centroids: Vec<Centroid>,
}

impl CentroidClassifier {
    /// 레이블된 시퀀스로 학습. 데이터가 없으면 `Dataset` 에러.
    pub fn train(samples: &[(SignLabel, Window)], temperature: f32) -> Result<Self, CoreError> {
        if samples.is_empty() {
            return Err(CoreError::Dataset("no data found".to_string()));
        }
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(CoreError::Config(format!(
                "temperature는 양수여야 함: {temperature}"
            )));
        }

        let mut sums: Vec<Option<(usize, Vec<f64>)>> = vec![None; LABEL_COUNT];
        for (label, window) in samples {
            let (count, sum) =
                sums[label.index()].get_or_insert_with(|| (0, vec![0.0; FEATURE_LEN]));
            *count += 1;
            for (acc, value) in sum.iter_mut().zip(window.flatten()) {
                *acc += f64::from(value);
            }
        }

        let centroids: Vec<Centroid> = sums
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let (samples, sum) = entry?;
                let label = SignLabel::from_index(index)?;
                let mean = sum.iter().map(|v| (v / samples as f64) as f32).collect();
                Some(Centroid {
                    label,
                    samples,
                    mean,
                })
            })
            .collect();

        info!(
            "분류기 학습 완료: 시퀀스 {}개, 레이블 {}개",
            samples.len(),
            centroids.len()
        );
        Ok(Self {
            temperature,
            centroids,
        })
    }

    /// 학습된 레이블 목록 (열거 순서)
    pub fn labels(&self) -> Vec<SignLabel> {
        self.centroids.iter().map(|c| c.label).collect()
    }

    /// JSON 모델 파일로 저장
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string(self)?;
        std::fs::write(path, content)?;
        info!("모델 저장: {}", path.display());
        Ok(())
    }

    /// JSON 모델 파일 로드
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Classifier(format!("모델 로드 실패 ({}): {e}", path.display()))
        })?;
        let model: Self = serde_json::from_str(&content)?;
        model.validate()?;
        debug!(
            "모델 로드: {} (레이블 {}개)",
            path.display(),
            model.centroids.len()
        );
        Ok(model)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.centroids.is_empty() {
            return Err(CoreError::Classifier("학습된 레이블 없음".to_string()));
        }
        if let Some(bad) = self.centroids.iter().find(|c| c.mean.len() != FEATURE_LEN) {
            return Err(CoreError::ShapeMismatch {
                expected: FEATURE_LEN,
                actual: bad.mean.len(),
            });
        }
        Ok(())
    }
}

impl SignClassifier for CentroidClassifier {
    fn predict_proba(&self, window: &Window) -> Result<Vec<f32>, CoreError> {
        self.validate()?;
        let features = window.flatten();

        let scores: Vec<(usize, f64)> = self
            .centroids
            .iter()
            .map(|c| {
                let distance: f64 = c
                    .mean
                    .iter()
                    .zip(&features)
                    .map(|(m, x)| f64::from(m - x).powi(2))
                    .sum::<f64>()
                    / FEATURE_LEN as f64;
                (c.label.index(), -distance / f64::from(self.temperature))
            })
            .collect();

        let max = scores
            .iter()
            .map(|(_, s)| *s)
            .fold(f64::NEG_INFINITY, f64::max);
        let total: f64 = scores.iter().map(|(_, s)| (s - max).exp()).sum();

        let mut probabilities = vec![0.0f32; LABEL_COUNT];
        for (index, score) in scores {
            probabilities[index] = ((score - max).exp() / total) as f32;
        }
        Ok(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::vector;

    fn window(value: f32) -> Window {
        Window::replicate(&vector(value))
    }

    fn label(c: char) -> SignLabel {
        SignLabel::from_char(c).unwrap()
    }

    fn two_label_model() -> CentroidClassifier {
        let samples = vec![
            (label('A'), window(0.1)),
            (label('A'), window(0.3)),
            (label('C'), window(0.9)),
        ];
        CentroidClassifier::train(&samples, 0.01).unwrap()
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = CentroidClassifier::train(&[], 1.0).unwrap_err();
        assert_eq!(err.to_string(), "데이터셋 에러: no data found");
    }

    #[test]
    fn predicts_nearest_centroid() {
        let model = two_label_model();
        assert_eq!(model.labels(), vec![label('A'), label('C')]);

        let near_a = model.predict(&window(0.25)).unwrap();
        assert_eq!(near_a.label, label('A'));
        let near_c = model.predict(&window(0.8)).unwrap();
        assert_eq!(near_c.label, label('C'));
        assert!(near_c.confidence > 0.5 && near_c.confidence <= 1.0);
    }

    #[test]
    fn untrained_labels_get_zero_probability() {
        let model = two_label_model();
        let probabilities = model.predict_proba(&window(0.5)).unwrap();

        assert_eq!(probabilities.len(), LABEL_COUNT);
        let total: f32 = probabilities.iter().sum();
        assert!((total - 1.0).abs() < 1e-4);
        for (i, p) in probabilities.iter().enumerate() {
            if i != label('A').index() && i != label('C').index() {
                assert_eq!(*p, 0.0);
            }
        }
    }

    #[test]
    fn save_and_load_preserve_predictions() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("models").join("signtalk_model.json");
        let model = two_label_model();
        model.save(&path).unwrap();

        let loaded = CentroidClassifier::load(&path).unwrap();
        let probe = window(0.6);
        assert_eq!(
            model.predict_proba(&probe).unwrap(),
            loaded.predict_proba(&probe).unwrap()
        );
    }

    #[test]
    fn missing_model_file_is_classifier_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = CentroidClassifier::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CoreError::Classifier(_)));
    }
}
