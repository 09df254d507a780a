//! SIGNTALK 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 에러 타입에서 `From<CoreError>`로 변환한다.
//! 손 미검출은 에러가 아니라 빈 검출 결과로 표현된다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 자격증명 누락/형식 오류
    #[error("인증 에러: {0}")]
    Unauthorized(String),

    /// 레지스트리에 없는 세션 ID
    #[error("유효하지 않은 세션: {id}")]
    InvalidSession {
        /// 요청된 세션 식별자
        id: String,
    },

    /// 검출 요청에 이미지가 없음
    #[error("이미지가 제공되지 않음")]
    NoImageProvided,

    /// 디코딩할 수 없는 이미지
    #[error("잘못된 이미지: {0}")]
    InvalidImage(String),

    /// 랜드마크 벡터 길이 불일치
    #[error("형상 불일치: expected={expected}, actual={actual}")]
    ShapeMismatch {
        /// 기대한 스칼라 수
        expected: usize,
        /// 실제 스칼라 수
        actual: usize,
    },

    /// 분류기 추론/로드 실패
    #[error("분류기 에러: {0}")]
    Classifier(String),

    /// 랜드마크 추출기 호출 실패
    #[error("랜드마크 추출 에러: {0}")]
    Landmark(String),

    /// 음성 합성 실패
    #[error("음성 합성 에러: {0}")]
    Speech(String),

    /// 데이터셋 로드/저장 실패
    #[error("데이터셋 에러: {0}")]
    Dataset(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 세션 미발견 에러 생성
    pub fn invalid_session(id: impl Into<String>) -> Self {
        Self::InvalidSession { id: id.into() }
    }

    /// 클라이언트 요청 자체의 문제인지 여부 (4xx 계열)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_)
                | Self::InvalidSession { .. }
                | Self::NoImageProvided
                | Self::InvalidImage(_)
                | Self::ShapeMismatch { .. }
        )
    }
}
