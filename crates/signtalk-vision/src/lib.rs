//! # signtalk-vision
//!
//! 이미지 입력 어댑터 크레이트.
//! 업로드/녹화 이미지 검증, 외부 손 랜드마크 서비스 호출,
//! 디렉토리 기반 프레임 소스를 담당한다.

pub mod frame_source;
pub mod image_check;
pub mod remote_landmarker;
