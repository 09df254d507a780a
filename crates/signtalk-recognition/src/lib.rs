//! # signtalk-recognition
//!
//! 손 랜드마크 프레임을 고정 길이 윈도우로 묶고, 분류하고,
//! 반복 예측을 걸러 안정적인 인식 텍스트로 만드는 핵심 로직.
//!
//! - [`sequence_buffer`]: 30프레임 비중첩 윈도우 조립
//! - [`stabilizer`]: 엣지 트리거 / 합의 게이트 디바운스 전략
//! - [`stream`]: 스트림별 버퍼 + 마지막 방출 레이블 + 인식 텍스트
//! - [`session_registry`]: 세션 수명 관리 (인증 → 시작 → 종료, 만료 스윕)
//! - [`pipeline`]: 추출 → 버퍼 → 분류 → 안정화 연결
//! - [`classifier`]: 레이블별 평균 윈도우 기반 분류기와 학습
//! - [`collector`]: 레이블된 학습 시퀀스 수집

pub mod classifier;
pub mod collector;
pub mod pipeline;
pub mod sequence_buffer;
pub mod session_registry;
pub mod stabilizer;
pub mod stream;

#[cfg(test)]
pub(crate) mod test_support;
