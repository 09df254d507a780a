//! 애플리케이션 설정 구조체.
//!
//! 웹 서버, 인식 파이프라인, 세션 만료, 모델/추출기 경로, 음성, 저장소 등
//! 런타임 설정을 정의한다. [`crate::config_manager::ConfigManager`]가
//! JSON 파일로 로드/저장하고, CLI 인자가 일부 값을 덮어쓴다.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 인식 파이프라인 설정
    #[serde(default)]
    pub recognition: RecognitionConfig,
    /// 세션 만료 설정
    #[serde(default)]
    pub session: SessionConfig,
    /// 분류기 모델 설정
    #[serde(default)]
    pub model: ModelConfig,
    /// 랜드마크 추출 서비스 설정
    #[serde(default)]
    pub landmarker: LandmarkerConfig,
    /// 음성 출력 설정
    #[serde(default)]
    pub speech: SpeechConfig,
    /// 데이터셋/로그 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
}

// ============================================================
// 웹 서버 설정
// ============================================================

/// 웹 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 웹 서버 포트 (기본: 5000)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 여부 (false: 127.0.0.1 only)
    #[serde(default)]
    pub allow_external: bool,
    /// 정적 파일 디렉토리 (None이면 정적 서빙 비활성화)
    #[serde(default = "default_static_dir")]
    pub static_dir: Option<PathBuf>,
    /// 업로드 이미지 최대 크기 (바이트)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: false,
            static_dir: default_static_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

// ============================================================
// 인식 파이프라인 설정
// ============================================================

/// HTTP 검출 모드
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectMode {
    /// 요청 이미지 하나를 30번 복제한 윈도우로 즉시 분류 (디바운스 없음)
    #[default]
    Snapshot,
    /// 세션 스트림에 프레임을 누적하고 30프레임이 모일 때만 분류
    Streaming,
}

/// 안정화 전략
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilizerStrategy {
    /// 직전 방출 레이블과 다를 때만 방출
    #[default]
    EdgeTrigger,
    /// 최소 신뢰도 + 연속 윈도우 합의 후 엣지 트리거
    ConsensusGate,
}

/// 인식 파이프라인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// HTTP 검출 모드
    #[serde(default)]
    pub detect_mode: DetectMode,
    /// 안정화 전략
    #[serde(default)]
    pub stabilizer: StabilizerStrategy,
    /// ConsensusGate 최소 신뢰도 (0.0 ~ 1.0)
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    /// ConsensusGate 합의에 필요한 연속 윈도우 수
    #[serde(default = "default_consensus_windows")]
    pub consensus_windows: usize,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            detect_mode: DetectMode::default(),
            stabilizer: StabilizerStrategy::default(),
            min_confidence: default_min_confidence(),
            consensus_windows: default_consensus_windows(),
        }
    }
}

// ============================================================
// 세션 / 모델 / 추출기 / 음성 / 저장소 설정
// ============================================================

/// 세션 만료 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 마지막 활동 후 세션 유지 시간 (초)
    #[serde(default = "default_session_ttl_secs")]
    pub ttl_secs: u64,
    /// 만료 스윕 주기 (초)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    /// 세션 TTL
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// 만료 스윕 주기 (최소 1초)
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

/// 분류기 모델 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 모델 파일 경로 (프로세스 시작 시 1회 로드)
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
    /// 학습 시 소프트맥스 온도
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            temperature: default_temperature(),
        }
    }
}

/// 랜드마크 추출 서비스 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkerConfig {
    /// 추출 서비스 엔드포인트 (이미지 바이트 POST → JSON)
    #[serde(default = "default_landmarker_endpoint")]
    pub endpoint: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_landmarker_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LandmarkerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_landmarker_endpoint(),
            timeout_ms: default_landmarker_timeout_ms(),
        }
    }
}

/// 음성 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// 음성 출력 활성화 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// TTS 명령 (예: "espeak")
    #[serde(default = "default_speech_command")]
    pub command: String,
    /// 말하기 속도 (분당 단어 수)
    #[serde(default = "default_speech_rate")]
    pub rate: u32,
    /// 볼륨 (0.0 ~ 1.0)
    #[serde(default = "default_speech_volume")]
    pub volume: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_speech_command(),
            rate: default_speech_rate(),
            volume: default_speech_volume(),
        }
    }
}

/// 데이터셋/로그 저장소 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 데이터셋 루트 디렉토리 (레이블별 하위 폴더)
    #[serde(default = "default_dataset_dir")]
    pub dataset_dir: PathBuf,
    /// 레이블당 수집할 시퀀스 수
    #[serde(default = "default_sequences_per_label")]
    pub sequences_per_label: usize,
    /// 인식 결과 트랜스크립트 로그 경로
    #[serde(default = "default_transcript_path")]
    pub transcript_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dataset_dir: default_dataset_dir(),
            sequences_per_label: default_sequences_per_label(),
            transcript_path: default_transcript_path(),
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            web: WebConfig::default(),
            recognition: RecognitionConfig::default(),
            session: SessionConfig::default(),
            model: ModelConfig::default(),
            landmarker: LandmarkerConfig::default(),
            speech: SpeechConfig::default(),
            storage: StorageConfig::default(),
        }
    }

}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}

fn default_web_port() -> u16 {
    5000
}
fn default_static_dir() -> Option<PathBuf> {
    Some(PathBuf::from("static"))
}
fn default_max_upload_bytes() -> usize {
    8 * 1024 * 1024
}
fn default_min_confidence() -> f32 {
    0.6
}
fn default_consensus_windows() -> usize {
    2
}
fn default_session_ttl_secs() -> u64 {
    1_800 // 30분
}
fn default_sweep_interval_secs() -> u64 {
    60
}
fn default_model_path() -> PathBuf {
    PathBuf::from("signtalk_model.json")
}
fn default_temperature() -> f32 {
    1.0
}
fn default_landmarker_endpoint() -> String {
    "http://127.0.0.1:8765/landmarks".to_string()
}
fn default_landmarker_timeout_ms() -> u64 {
    5_000
}
fn default_speech_command() -> String {
    "espeak".to_string()
}
fn default_speech_rate() -> u32 {
    150
}
fn default_speech_volume() -> f32 {
    1.0
}
fn default_dataset_dir() -> PathBuf {
    PathBuf::from("dataset")
}
fn default_sequences_per_label() -> usize {
    5
}
fn default_transcript_path() -> PathBuf {
    PathBuf::from("output_log.txt")
}
