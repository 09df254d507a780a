//! 수집 → 학습 → 번역 전체 흐름 통합 테스트.
//!
//! 랜드마크 서비스는 mockito로 대체하고, 데이터셋/모델/로그는 임시 디렉토리에 둔다.

mod common;

use common::*;
use signtalk_core::config::{RecognitionConfig, StabilizerStrategy};
use signtalk_core::ports::dataset::SequenceRepository;
use signtalk_core::ports::frame_source::FrameSource;
use signtalk_core::ports::sink::SignSink;
use signtalk_recognition::classifier::CentroidClassifier;
use signtalk_recognition::collector::SequenceCollector;
use signtalk_recognition::pipeline::{dispatch, FrameOutcome, SignPipeline};
use signtalk_recognition::stream::SignStream;
use signtalk_storage::dataset_store::DatasetStore;
use signtalk_storage::transcript::TranscriptLog;
use signtalk_vision::frame_source::ImageDirSource;
use signtalk_vision::remote_landmarker::RemoteLandmarker;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const FRAMES_PER_WINDOW: usize = 30;

async fn collect_label(
    store: Arc<DatasetStore>,
    frames_dir: &Path,
    letter: char,
    value: f32,
) -> usize {
    let (server, _mock) = landmark_service(Some(value)).await;
    let landmarker = Arc::new(RemoteLandmarker::new(&landmarker_config(&server)).unwrap());
    let collector = SequenceCollector::new(landmarker, store, 2);

    let mut source = ImageDirSource::open(frames_dir).await.unwrap();
    let report = collector.collect(label(letter), &mut source).await.unwrap();
    for path in &report.saved {
        assert_eq!(
            path.parent().and_then(|p| p.file_name()).unwrap(),
            letter.to_string().as_str()
        );
    }
    report.saved.len()
}

/// 프레임 디렉토리를 한 번 끝까지 처리하고 방출 수 반환
async fn run_source(
    pipeline: &SignPipeline,
    stream: &mut SignStream,
    frames_dir: &Path,
    sinks: &[Arc<dyn SignSink>],
) -> usize {
    let mut source = ImageDirSource::open(frames_dir).await.unwrap();
    let mut emitted = 0;
    while let Some(frame) = source.next_frame().await.unwrap() {
        let outcome = pipeline.process_frame(stream, &frame.data).await.unwrap();
        if let FrameOutcome::Classified {
            emitted: Some(sign),
            ..
        } = outcome
        {
            assert_eq!(dispatch(sinks, &sign).await, 0);
            emitted += 1;
        }
    }
    emitted
}

#[tokio::test]
async fn collect_train_translate_roundtrip() {
    let dir = TempDir::new().unwrap();
    let frames_dir = dir.path().join("frames");
    write_frames(&frames_dir, FRAMES_PER_WINDOW * 2);

    // 1. 수집: A는 0.1, B는 0.9 부근의 손
    let store = Arc::new(DatasetStore::open(dir.path().join("dataset")).await.unwrap());
    assert_eq!(collect_label(store.clone(), &frames_dir, 'A', 0.1).await, 2);
    assert_eq!(collect_label(store.clone(), &frames_dir, 'B', 0.9).await, 2);
    // 할당량이 찼으면 더 모으지 않음
    assert_eq!(collect_label(store.clone(), &frames_dir, 'A', 0.1).await, 0);

    // 2. 학습 + 저장 + 로드
    let samples = store.load_all().await.unwrap();
    assert_eq!(samples.len(), 4);
    let model_path = dir.path().join("models/signtalk_model.json");
    CentroidClassifier::train(&samples, 1.0)
        .unwrap()
        .save(&model_path)
        .unwrap();
    let classifier = Arc::new(CentroidClassifier::load(&model_path).unwrap());
    assert_eq!(classifier.labels(), vec![label('A'), label('B')]);

    // 3. 번역: B에 가까운 손만 보이는 프레임
    let (server, _mock) = landmark_service(Some(0.85)).await;
    let pipeline = SignPipeline::new(
        Arc::new(RemoteLandmarker::new(&landmarker_config(&server)).unwrap()),
        classifier,
    );
    let log_path = dir.path().join("logs/translation_log.txt");
    let transcript = Arc::new(TranscriptLog::open(&log_path).await.unwrap());
    let sinks: Vec<Arc<dyn SignSink>> = vec![transcript];
    let mut stream = SignStream::from_config(&RecognitionConfig::default());

    // 윈도우 두 개 모두 B → 한 번만 방출
    assert_eq!(run_source(&pipeline, &mut stream, &frames_dir, &sinks).await, 1);
    assert_eq!(stream.recognized_text(), "B");
    assert_eq!(stream.pending_frames(), 0);

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.starts_with("\n--- SESSION STARTED: "));
    assert!(log.ends_with(" ---\nB"));
}

#[tokio::test]
async fn consensus_gate_waits_for_agreement() {
    let dir = TempDir::new().unwrap();
    let frames_dir = dir.path().join("frames");
    write_frames(&frames_dir, FRAMES_PER_WINDOW);

    let samples = vec![(label('A'), window(0.1)), (label('B'), window(0.9))];
    let classifier = Arc::new(CentroidClassifier::train(&samples, 0.01).unwrap());

    let (server, _mock) = landmark_service(Some(0.1)).await;
    let pipeline = SignPipeline::new(
        Arc::new(RemoteLandmarker::new(&landmarker_config(&server)).unwrap()),
        classifier,
    );
    let config = RecognitionConfig {
        stabilizer: StabilizerStrategy::ConsensusGate,
        min_confidence: 0.6,
        consensus_windows: 2,
        ..RecognitionConfig::default()
    };
    let mut stream = SignStream::from_config(&config);

    // 첫 윈도우는 합의 대기
    assert_eq!(run_source(&pipeline, &mut stream, &frames_dir, &[]).await, 0);
    assert_eq!(stream.recognized_text(), "");
    // 같은 레이블 두 번째 윈도우에서 방출
    assert_eq!(run_source(&pipeline, &mut stream, &frames_dir, &[]).await, 1);
    assert_eq!(stream.recognized_text(), "A");
}

#[tokio::test]
async fn frames_without_hand_are_not_collected() {
    let dir = TempDir::new().unwrap();
    let frames_dir = dir.path().join("frames");
    write_frames(&frames_dir, FRAMES_PER_WINDOW);

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/landmarks")
        .with_status(200)
        .with_body(hands_body(None))
        .expect(FRAMES_PER_WINDOW)
        .create_async()
        .await;
    let store = Arc::new(DatasetStore::open(dir.path().join("dataset")).await.unwrap());
    let collector = SequenceCollector::new(
        Arc::new(RemoteLandmarker::new(&landmarker_config(&server)).unwrap()),
        store.clone(),
        1,
    );

    let mut source = ImageDirSource::open(&frames_dir).await.unwrap();
    let report = collector.collect(label('Z'), &mut source).await.unwrap();

    assert!(report.saved.is_empty());
    assert_eq!(report.frames_skipped, FRAMES_PER_WINDOW as u64);
    assert_eq!(store.count(label('Z')).await.unwrap(), 0);
    mock.assert_async().await;
}
