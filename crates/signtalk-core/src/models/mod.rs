//! SIGNTALK 도메인 모델.
//!
//! 랜드마크 벡터, 시퀀스 윈도우, 예측, 세션 등
//! 인식 파이프라인 전체가 공유하는 데이터 구조체를 정의한다.

pub mod frame;
pub mod label;
pub mod landmark;
pub mod prediction;
pub mod session;
pub mod window;
