//! 단위 테스트용 헬퍼와 가짜 포트 구현.

use async_trait::async_trait;
use parking_lot::Mutex;
use signtalk_core::error::CoreError;
use signtalk_core::models::label::LABEL_COUNT;
use signtalk_core::models::landmark::{
    HandDetection, LandmarkPoint, LandmarkVector, LANDMARK_POINTS, VECTOR_LEN,
};
use signtalk_core::models::window::Window;
use signtalk_core::ports::classifier::SignClassifier;
use signtalk_core::ports::landmarker::HandLandmarker;
use std::collections::VecDeque;

/// 모든 스칼라가 `value`인 벡터
pub fn vector(value: f32) -> LandmarkVector {
    LandmarkVector::new(vec![value; VECTOR_LEN]).unwrap()
}

/// 손 하나짜리 검출 결과
pub fn one_hand(value: f32) -> HandDetection {
    HandDetection {
        hands: vec![vec![
            LandmarkPoint {
                x: value,
                y: value,
                z: value,
            };
            LANDMARK_POINTS
        ]],
    }
}

/// `index` 레이블에 `confidence`를 주는 분포
pub fn distribution(index: usize, confidence: f32) -> Vec<f32> {
    let rest = (1.0 - confidence) / (LABEL_COUNT - 1) as f32;
    let mut probs = vec![rest; LABEL_COUNT];
    probs[index] = confidence;
    probs
}

/// 미리 정한 분포를 순서대로 돌려주는 분류기 (마지막 분포는 반복)
pub struct ScriptedClassifier {
    script: Mutex<VecDeque<Vec<f32>>>,
    last: Mutex<Vec<f32>>,
}

impl ScriptedClassifier {
    pub fn new(script: Vec<Vec<f32>>) -> Self {
        let last = script.last().cloned().unwrap_or_else(|| distribution(0, 0.9));
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(last),
        }
    }

    pub fn fixed(index: usize, confidence: f32) -> Self {
        Self::new(vec![distribution(index, confidence)])
    }
}

impl SignClassifier for ScriptedClassifier {
    fn predict_proba(&self, _window: &Window) -> Result<Vec<f32>, CoreError> {
        match self.script.lock().pop_front() {
            Some(next) => {
                *self.last.lock() = next.clone();
                Ok(next)
            }
            None => Ok(self.last.lock().clone()),
        }
    }
}

/// 항상 같은 검출 결과를 돌려주는 추출기
pub struct StaticLandmarker(pub HandDetection);

#[async_trait]
impl HandLandmarker for StaticLandmarker {
    async fn detect_hands(&self, _image: &[u8]) -> Result<HandDetection, CoreError> {
        Ok(self.0.clone())
    }

    fn provider_name(&self) -> &str {
        "static"
    }
}
