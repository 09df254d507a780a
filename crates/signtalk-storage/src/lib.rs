//! # signtalk-storage
//!
//! 로컬 저장소 어댑터.
//!
//! ## 모듈
//! - `dataset_store`: 레이블별 폴더에 학습 시퀀스 JSON 저장 (SequenceRepository 구현)
//! - `transcript`: 인식된 글자를 세션 헤더와 함께 덧붙이는 기록 로그 (SignSink 구현)

pub mod dataset_store;
pub mod transcript;
