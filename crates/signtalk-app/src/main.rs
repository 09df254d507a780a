//! # signtalk-app
//!
//! SIGNTALK 바이너리 진입점.
//! CLI 파싱, 설정 로드, DI 조립, 라이프사이클 관리.

mod commands;
mod lifecycle;
mod overlay;
mod speech;
mod translator;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use directories::ProjectDirs;
use signtalk_core::config::{AppConfig, DetectMode, StabilizerStrategy};
use signtalk_core::config_manager::ConfigManager;
use signtalk_core::models::label::SignLabel;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;

/// 설정 파일 이름
const CONFIG_FILE_NAME: &str = "config.json";

/// SIGNTALK 지문자 인식기
///
/// 손 랜드마크 기반 수어 알파벳 인식 서버 및 로컬 번역기
#[derive(Parser, Debug)]
#[command(name = "signtalk")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    /// 모델 파일 경로
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// 데이터셋 디렉토리
    #[arg(long, global = true)]
    dataset_dir: Option<PathBuf>,

    /// 랜드마크 서비스 엔드포인트
    #[arg(long, global = true)]
    landmarker_url: Option<String>,

    /// 안정화 전략
    #[arg(long, value_enum, global = true)]
    stabilizer: Option<StabilizerArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 검출 서버 실행
    Serve {
        /// 서버 포트 (기본: 5000)
        #[arg(long, short = 'p')]
        port: Option<u16>,

        /// 외부 접근 허용 (0.0.0.0 바인드)
        #[arg(long)]
        allow_external: bool,

        /// 정적 파일 디렉토리
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// 검출 모드
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// 레이블 학습 시퀀스 수집
    Collect {
        /// 수집할 레이블 (A-Z)
        #[arg(long, value_parser = parse_label)]
        label: SignLabel,

        /// 프레임 이미지 디렉토리
        #[arg(long)]
        frames_dir: PathBuf,
    },
    /// 저장된 시퀀스로 모델 학습
    Train,
    /// 프레임 디렉토리를 읽어 로컬 번역
    Translate {
        /// 프레임 이미지 디렉토리
        #[arg(long)]
        frames_dir: PathBuf,

        /// 음성 출력 끄기
        #[arg(long)]
        no_speech: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Snapshot,
    Streaming,
}

impl From<ModeArg> for DetectMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Snapshot => DetectMode::Snapshot,
            ModeArg::Streaming => DetectMode::Streaming,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StabilizerArg {
    EdgeTrigger,
    ConsensusGate,
}

impl From<StabilizerArg> for StabilizerStrategy {
    fn from(strategy: StabilizerArg) -> Self {
        match strategy {
            StabilizerArg::EdgeTrigger => StabilizerStrategy::EdgeTrigger,
            StabilizerArg::ConsensusGate => StabilizerStrategy::ConsensusGate,
        }
    }
}

fn parse_label(value: &str) -> Result<SignLabel, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => SignLabel::from_char(c.to_ascii_uppercase())
            .ok_or_else(|| format!("A-Z 중 하나여야 합니다: {value}")),
        _ => Err(format!("글자 하나여야 합니다: {value}")),
    }
}

/// 설정 파일 경로 결정 (CLI 인자 또는 플랫폼별 기본 경로)
///
/// # 플랫폼별 기본 경로:
/// - macOS: `~/Library/Application Support/com.signtalk.signtalk/config.json`
/// - Windows: `%APPDATA%\signtalk\signtalk\config\config.json`
/// - Linux: `~/.config/signtalk/config.json`
fn resolve_config_path(cli: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = cli {
        return Ok(path.to_path_buf());
    }
    ProjectDirs::from("com", "signtalk", "signtalk")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or_else(|| anyhow!("설정 디렉토리를 찾을 수 없습니다. --config로 지정하세요"))
}

/// CLI 인자로 설정 덮어쓰기 (파일에는 저장하지 않음)
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(model) = &args.model {
        config.model.path = model.clone();
    }
    if let Some(dir) = &args.dataset_dir {
        config.storage.dataset_dir = dir.clone();
    }
    if let Some(url) = &args.landmarker_url {
        config.landmarker.endpoint = url.clone();
    }
    if let Some(strategy) = args.stabilizer {
        config.recognition.stabilizer = strategy.into();
    }

    match &args.command {
        Command::Serve {
            port,
            allow_external,
            static_dir,
            mode,
        } => {
            if let Some(port) = port {
                config.web.port = *port;
            }
            if *allow_external {
                config.web.allow_external = true;
            }
            if let Some(dir) = static_dir {
                config.web.static_dir = Some(dir.clone());
            }
            if let Some(mode) = mode {
                config.recognition.detect_mode = (*mode).into();
            }
        }
        Command::Translate { no_speech, .. } => {
            if *no_speech {
                config.speech.enabled = false;
            }
        }
        Command::Collect { .. } | Command::Train => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("SIGNTALK v{} 시작", env!("CARGO_PKG_VERSION"));

    let config_path = resolve_config_path(args.config.as_deref())?;
    let manager = ConfigManager::with_path(config_path)?;
    info!("설정 파일: {}", manager.config_path().display());

    let mut config = manager.get();
    apply_overrides(&mut config, &args);

    let lifecycle = LifecycleManager::new();
    match &args.command {
        Command::Serve { .. } => commands::serve(&config, &lifecycle).await?,
        Command::Collect { label, frames_dir } => {
            commands::collect(&config, *label, frames_dir).await?;
        }
        Command::Train => {
            commands::train(&config).await?;
        }
        Command::Translate { frames_dir, .. } => {
            let summary = commands::translate(&config, frames_dir, &lifecycle).await?;
            info!("최종 텍스트: {}", summary.text);
        }
    }

    if lifecycle.is_shutting_down() {
        info!("시그널로 종료");
    }
    info!("SIGNTALK 종료");
    Ok(())
}
