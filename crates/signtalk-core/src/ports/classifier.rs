//! 시퀀스 분류기 포트.
//!
//! 구현: `signtalk-recognition` crate (`CentroidClassifier`)

use crate::error::CoreError;
use crate::models::prediction::Prediction;
use crate::models::window::Window;

/// 완성된 윈도우 → 26개 레이블 확률 분포
///
/// 호출 간 상태를 갖지 않으며, 같은 윈도우에 대해 같은 결과를 낸다.
pub trait SignClassifier: Send + Sync {
    /// 레이블 열거 순서대로의 확률 분포 (길이 26, 음수 없음)
    fn predict_proba(&self, window: &Window) -> Result<Vec<f32>, CoreError>;

    /// argmax 예측 (동률이면 앞선 레이블)
    fn predict(&self, window: &Window) -> Result<Prediction, CoreError> {
        let probabilities = self.predict_proba(window)?;
        Prediction::from_distribution(&probabilities)
    }
}
