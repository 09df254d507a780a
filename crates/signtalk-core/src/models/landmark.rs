//! 손 랜드마크 모델.
//!
//! 추출기가 반환하는 정규화 3D 포인트와, 한 프레임 분량의
//! 평탄화된 좌표 벡터(`LandmarkVector`)를 정의.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 손 하나당 랜드마크 포인트 수
pub const LANDMARK_POINTS: usize = 21;

/// 포인트당 좌표 수 (x, y, z)
pub const COORDS_PER_POINT: usize = 3;

/// 벡터 하나의 스칼라 수 (21 × 3)
pub const VECTOR_LEN: usize = LANDMARK_POINTS * COORDS_PER_POINT;

/// 정규화된 3D 랜드마크 포인트
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    /// 이미지 너비 기준 정규화 x
    pub x: f32,
    /// 이미지 높이 기준 정규화 y
    pub y: f32,
    /// 손목 기준 상대 깊이
    pub z: f32,
}

/// 한 프레임의 평탄화된 랜드마크 좌표 `[x0, y0, z0, x1, …]`
///
/// 생성 시 길이를 검증하며 이후에는 불변이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct LandmarkVector(Vec<f32>);

impl LandmarkVector {
    /// 스칼라 슬라이스로 생성. 길이가 [`VECTOR_LEN`]이 아니면 `ShapeMismatch`.
    pub fn new(values: Vec<f32>) -> Result<Self, CoreError> {
        if values.len() != VECTOR_LEN {
            return Err(CoreError::ShapeMismatch {
                expected: VECTOR_LEN,
                actual: values.len(),
            });
        }
        Ok(Self(values))
    }

    /// 포인트 목록을 평탄화하여 생성
    pub fn from_points(points: &[LandmarkPoint]) -> Result<Self, CoreError> {
        let values = points.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
        Self::new(values)
    }

    /// 스칼라 값
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl TryFrom<Vec<f32>> for LandmarkVector {
    type Error = CoreError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<LandmarkVector> for Vec<f32> {
    fn from(vector: LandmarkVector) -> Self {
        vector.0
    }
}

/// 이미지 한 장에 대한 추출 결과: 검출된 손마다 포인트 목록
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandDetection {
    /// 검출 순서대로의 손 목록
    #[serde(default)]
    pub hands: Vec<Vec<LandmarkPoint>>,
}

impl HandDetection {
    /// 손이 하나도 없는 결과
    pub fn none() -> Self {
        Self::default()
    }

    /// 손 검출 여부
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// 첫 번째 손의 벡터. 나머지 손은 무시한다.
    pub fn first_hand(&self) -> Result<Option<LandmarkVector>, CoreError> {
        self.hands
            .first()
            .map(|points| LandmarkVector::from_points(points))
            .transpose()
    }
}
