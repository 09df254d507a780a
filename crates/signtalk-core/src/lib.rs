//! # signtalk-core
//!
//! SIGNTALK 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 도메인 데이터 구조체 (랜드마크, 윈도우, 예측, 세션)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::label::SignLabel;
    use crate::models::prediction::Prediction;

    #[test]
    fn prediction_serde_roundtrip() {
        let prediction = Prediction {
            label: SignLabel::from_char('Q').unwrap(),
            confidence: 0.87,
        };

        let json = serde_json::to_string(&prediction).unwrap();
        assert!(json.contains("\"Q\""));
        let deserialized: Prediction = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.label.as_char(), 'Q');
        assert!(deserialized.confidence > 0.8);
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.web.port, 5000);
        assert_eq!(config.session.ttl_secs, 1_800);
        assert_eq!(config.storage.sequences_per_label, 5);
        assert!(config.speech.enabled);
    }
}
