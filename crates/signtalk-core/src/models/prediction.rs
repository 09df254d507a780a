//! 분류 예측 모델.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::label::{SignLabel, LABEL_COUNT};

/// 완성된 윈도우 하나에 대한 예측 (레이블, 신뢰도)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 최대 확률 레이블
    #[serde(rename = "sign")]
    pub label: SignLabel,
    /// 해당 레이블의 확률 (0.0 ~ 1.0)
    pub confidence: f32,
}

impl Prediction {
    /// 확률 분포에서 argmax 예측 생성.
    ///
    /// 동률이면 열거 순서상 가장 앞의 레이블을 고른다.
    /// 길이가 26이 아니거나 음수/비유한 값이 있으면 `Classifier` 에러.
    pub fn from_distribution(probabilities: &[f32]) -> Result<Self, CoreError> {
        if probabilities.len() != LABEL_COUNT {
            return Err(CoreError::Classifier(format!(
                "확률 분포 길이 {} (기대값 {LABEL_COUNT})",
                probabilities.len()
            )));
        }
        if let Some(bad) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(CoreError::Classifier(format!("잘못된 확률 값: {bad}")));
        }

        let mut best = 0;
        for (i, &p) in probabilities.iter().enumerate().skip(1) {
            // 엄격한 비교, 동률이면 앞선 인덱스 유지
            if p > probabilities[best] {
                best = i;
            }
        }

        let label = SignLabel::from_index(best)
            .ok_or_else(|| CoreError::Internal(format!("레이블 인덱스 범위 초과: {best}")))?;
        Ok(Self {
            label,
            confidence: probabilities[best],
        })
    }
}
