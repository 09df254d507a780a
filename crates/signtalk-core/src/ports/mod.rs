//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 각 어댑터 crate가 이 trait들을 구현하며,
//! `signtalk-app`에서 `Arc<dyn T>` / `Box<dyn T>`로 와이어링한다.
//!
//! I/O가 있는 trait은 `async_trait` 매크로로 object safety를 보장하고,
//! 순수 연산인 분류기는 동기 trait으로 둔다.

pub mod classifier;
pub mod dataset;
pub mod frame_source;
pub mod landmarker;
pub mod sink;
pub mod speech;
