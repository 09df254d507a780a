//! 서브커맨드 실행과 의존성 조립.
//!
//! 추출기, 분류기, 레지스트리, 싱크는 여기서 한 번 생성되어
//! 웹 상태나 번역 루프에 `Arc` 핸들로 전달된다.

use anyhow::{Context, Result};
use signtalk_core::config::AppConfig;
use signtalk_core::models::label::SignLabel;
use signtalk_core::ports::classifier::SignClassifier;
use signtalk_core::ports::dataset::SequenceRepository;
use signtalk_core::ports::landmarker::HandLandmarker;
use signtalk_core::ports::sink::SignSink;
use signtalk_recognition::classifier::CentroidClassifier;
use signtalk_recognition::collector::{CollectReport, SequenceCollector};
use signtalk_recognition::pipeline::SignPipeline;
use signtalk_recognition::session_registry::SessionRegistry;
use signtalk_recognition::stream::SignStream;
use signtalk_storage::dataset_store::DatasetStore;
use signtalk_storage::transcript::TranscriptLog;
use signtalk_vision::frame_source::ImageDirSource;
use signtalk_vision::remote_landmarker::RemoteLandmarker;
use signtalk_web::{AppState, WebServer};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::lifecycle::LifecycleManager;
use crate::overlay::OverlaySink;
use crate::speech::{CommandSpeaker, SpeechSink};
use crate::translator::{TranslateSummary, Translator};

/// 랜드마크 추출기 생성
fn build_landmarker(config: &AppConfig) -> Result<Arc<dyn HandLandmarker>> {
    let landmarker = RemoteLandmarker::new(&config.landmarker)?;
    info!("랜드마크 서비스: {}", landmarker.endpoint());
    Ok(Arc::new(landmarker))
}

/// 학습된 모델 로드
fn load_classifier(config: &AppConfig) -> Result<Arc<dyn SignClassifier>> {
    let path = &config.model.path;
    let classifier = CentroidClassifier::load(path).with_context(|| {
        format!(
            "모델을 불러올 수 없습니다: {} (먼저 `signtalk train` 실행)",
            path.display()
        )
    })?;
    info!(
        "모델 로드: {} (레이블 {}개)",
        path.display(),
        classifier.labels().len()
    );
    Ok(Arc::new(classifier))
}

fn build_pipeline(config: &AppConfig) -> Result<SignPipeline> {
    Ok(SignPipeline::new(
        build_landmarker(config)?,
        load_classifier(config)?,
    ))
}

/// 번역 루프 싱크 구성: 트랜스크립트 → 음성 → 오버레이
pub async fn build_sinks(config: &AppConfig) -> Result<Vec<Arc<dyn SignSink>>> {
    let transcript = TranscriptLog::open(&config.storage.transcript_path)
        .await
        .with_context(|| {
            format!(
                "트랜스크립트 로그 열기 실패: {}",
                config.storage.transcript_path.display()
            )
        })?;

    let mut sinks: Vec<Arc<dyn SignSink>> = vec![Arc::new(transcript)];
    if config.speech.enabled {
        let speaker = CommandSpeaker::from_config(&config.speech);
        sinks.push(Arc::new(SpeechSink::new(Arc::new(speaker))));
    } else {
        info!("음성 출력 비활성화");
    }
    sinks.push(Arc::new(OverlaySink::new()));
    Ok(sinks)
}

/// `serve`: 검출 서버 실행 (종료 신호까지)
pub async fn serve(config: &AppConfig, lifecycle: &LifecycleManager) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let registry = Arc::new(SessionRegistry::new(config.recognition.clone()));
    let state = AppState::new(registry, pipeline, config.recognition.detect_mode);

    let server =
        WebServer::new(config.web.clone(), state).with_session_config(config.session.clone());
    info!(
        "검출 서버 준비: {} (모드 {:?})",
        server.url(),
        config.recognition.detect_mode
    );

    let mut server_task = tokio::spawn(server.run(lifecycle.subscribe()));
    let stopped_early = tokio::select! {
        _ = lifecycle.wait_for_signal() => None,
        result = &mut server_task => Some(result),
    };
    match stopped_early {
        Some(result) => result?.context("검출 서버 실행 실패")?,
        None => server_task.await??,
    }
    Ok(())
}

/// `collect`: 프레임 디렉토리에서 레이블 시퀀스 수집
pub async fn collect(
    config: &AppConfig,
    label: SignLabel,
    frames_dir: &Path,
) -> Result<CollectReport> {
    let store = Arc::new(DatasetStore::open(config.storage.dataset_dir.clone()).await?);
    let mut source = ImageDirSource::open(frames_dir).await?;

    let collector = SequenceCollector::new(
        build_landmarker(config)?,
        store,
        config.storage.sequences_per_label,
    );
    let report = collector.collect(label, &mut source).await?;
    info!(
        "수집 완료: 레이블 {label}, 저장 {}개, 읽은 프레임 {}개 (손 미검출 {}개)",
        report.saved.len(),
        report.frames_read,
        report.frames_skipped
    );
    Ok(report)
}

/// `train`: 저장된 시퀀스로 모델 학습 후 저장
pub async fn train(config: &AppConfig) -> Result<CentroidClassifier> {
    let store = DatasetStore::open(config.storage.dataset_dir.clone()).await?;
    let samples = store.load_all().await?;
    info!(
        "학습 데이터: 시퀀스 {}개 ({})",
        samples.len(),
        store.base_dir().display()
    );

    let classifier = CentroidClassifier::train(&samples, config.model.temperature)?;
    classifier.save(&config.model.path)?;
    info!(
        "학습 완료: 레이블 {}개 → {}",
        classifier.labels().len(),
        config.model.path.display()
    );
    Ok(classifier)
}

/// `translate`: 로컬 번역 루프 (소스 끝 또는 종료 신호까지)
pub async fn translate(
    config: &AppConfig,
    frames_dir: &Path,
    lifecycle: &LifecycleManager,
) -> Result<TranslateSummary> {
    let pipeline = build_pipeline(config)?;
    let mut source = ImageDirSource::open(frames_dir).await?;
    let sinks = build_sinks(config).await?;

    let translator = Translator::new(pipeline, SignStream::from_config(&config.recognition), sinks);
    let run = translator.run(&mut source, lifecycle.subscribe());
    tokio::pin!(run);

    let finished = tokio::select! {
        summary = &mut run => Some(summary),
        _ = lifecycle.wait_for_signal() => None,
    };
    let summary = match finished {
        Some(summary) => summary?,
        None => run.await?,
    };
    Ok(summary)
}
