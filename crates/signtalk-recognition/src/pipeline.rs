//! 인식 파이프라인.
//!
//! 이미지 → 추출기 → 랜드마크 벡터 → 스트림 버퍼 → (윈도우 완성 시) 분류기
//! → 안정화기 → 싱크. HTTP 검출 핸들러와 로컬 번역 루프가 공유한다.
//!
//! 추출은 async(외부 서비스 호출)이고, 버퍼/분류/안정화는 동기 연산이라
//! 세션 잠금 안에서 실행할 수 있다.

use signtalk_core::error::CoreError;
use signtalk_core::models::landmark::LandmarkVector;
use signtalk_core::models::prediction::Prediction;
use signtalk_core::models::window::Window;
use signtalk_core::ports::classifier::SignClassifier;
use signtalk_core::ports::landmarker::HandLandmarker;
use signtalk_core::ports::sink::{EmittedSign, SignSink};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::sequence_buffer::WindowProgress;
use crate::stream::SignStream;

/// 프레임 하나 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// 손 미검출: 버퍼 진행 없음
    NoHand,
    /// 윈도우 미완성
    Pending {
        /// 진행 중 윈도우 길이
        filled: usize,
    },
    /// 윈도우 완성 후 분류됨
    Classified {
        /// 원시 예측
        prediction: Prediction,
        /// 안정화기를 통과한 방출 기호 (억제 시 None)
        emitted: Option<EmittedSign>,
    },
}

/// 추출기 + 분류기 묶음
#[derive(Clone)]
pub struct SignPipeline {
    landmarker: Arc<dyn HandLandmarker>,
    classifier: Arc<dyn SignClassifier>,
}

impl SignPipeline {
    /// 새 파이프라인 생성
    pub fn new(landmarker: Arc<dyn HandLandmarker>, classifier: Arc<dyn SignClassifier>) -> Self {
        Self {
            landmarker,
            classifier,
        }
    }

    /// 이미지에서 첫 번째 손의 벡터 추출. 손이 없으면 `None`.
    pub async fn extract(&self, image: &[u8]) -> Result<Option<LandmarkVector>, CoreError> {
        extract_first_hand(self.landmarker.as_ref(), image).await
    }

    /// 단일 벡터를 30번 복제한 윈도우로 즉시 분류 (디바운스 없음)
    pub fn classify_snapshot(&self, vector: &LandmarkVector) -> Result<Prediction, CoreError> {
        self.classifier.predict(&Window::replicate(vector))
    }

    /// 추출된 벡터(또는 미검출)를 스트림에 넣고, 윈도우가 완성되면 분류/안정화
    pub fn feed(
        &self,
        stream: &mut SignStream,
        vector: Option<LandmarkVector>,
    ) -> Result<FrameOutcome, CoreError> {
        let detected = vector.is_some();
        match stream.push_frame(vector) {
            WindowProgress::Pending { .. } if !detected => Ok(FrameOutcome::NoHand),
            WindowProgress::Pending { filled } => Ok(FrameOutcome::Pending { filled }),
            WindowProgress::Complete(window) => {
                let prediction = self.classifier.predict(&window)?;
                let emitted = stream.apply_prediction(&prediction);
                Ok(FrameOutcome::Classified {
                    prediction,
                    emitted,
                })
            }
        }
    }

    /// 이미지 한 장을 스트림에 처리 (로컬 루프용)
    pub async fn process_frame(
        &self,
        stream: &mut SignStream,
        image: &[u8],
    ) -> Result<FrameOutcome, CoreError> {
        let vector = self.extract(image).await?;
        self.feed(stream, vector)
    }
}

/// 추출기로 이미지에서 첫 번째 손의 벡터를 얻는다. 나머지 손은 무시한다.
pub async fn extract_first_hand(
    landmarker: &dyn HandLandmarker,
    image: &[u8],
) -> Result<Option<LandmarkVector>, CoreError> {
    if image.is_empty() {
        return Err(CoreError::NoImageProvided);
    }

    let detection = landmarker.detect_hands(image).await?;
    if detection.hands.len() > 1 {
        debug!(
            "손 {}개 검출, 첫 번째 손만 사용 ({})",
            detection.hands.len(),
            landmarker.provider_name()
        );
    }
    detection.first_hand()
}

/// 방출 기호를 모든 싱크에 통지. 개별 싱크 실패는 경고만 남기고 계속한다.
pub async fn dispatch(sinks: &[Arc<dyn SignSink>], sign: &EmittedSign) -> usize {
    let mut failures = 0;
    for sink in sinks {
        if let Err(e) = sink.on_sign(sign).await {
            warn!("싱크 '{}' 통지 실패: {e}", sink.name());
            failures += 1;
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{one_hand, vector, ScriptedClassifier, StaticLandmarker};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use signtalk_core::models::landmark::HandDetection;
    use signtalk_core::models::window::SEQUENCE_LENGTH;

    fn pipeline(detection: HandDetection, classifier: ScriptedClassifier) -> SignPipeline {
        SignPipeline::new(
            Arc::new(StaticLandmarker(detection)),
            Arc::new(classifier),
        )
    }

    #[tokio::test]
    async fn empty_image_is_rejected() {
        let p = pipeline(one_hand(0.1), ScriptedClassifier::fixed(0, 0.9));
        let err = p.extract(&[]).await.unwrap_err();
        assert!(matches!(err, CoreError::NoImageProvided));
    }

    #[tokio::test]
    async fn no_hand_does_not_touch_stream() {
        let p = pipeline(HandDetection::none(), ScriptedClassifier::fixed(0, 0.9));
        let mut stream = SignStream::default();
        let outcome = p.process_frame(&mut stream, b"img").await.unwrap();
        assert_eq!(outcome, FrameOutcome::NoHand);
        assert_eq!(stream.pending_frames(), 0);
    }

    #[tokio::test]
    async fn thirtieth_frame_classifies_and_emits() {
        let p = pipeline(one_hand(0.3), ScriptedClassifier::fixed(1, 0.7));
        let mut stream = SignStream::default();

        for i in 1..SEQUENCE_LENGTH {
            let outcome = p.process_frame(&mut stream, b"img").await.unwrap();
            assert_eq!(outcome, FrameOutcome::Pending { filled: i });
        }

        match p.process_frame(&mut stream, b"img").await.unwrap() {
            FrameOutcome::Classified {
                prediction,
                emitted,
            } => {
                assert_eq!(prediction.label.as_char(), 'B');
                assert_eq!(emitted.unwrap().recognized_text, "B");
            }
            other => panic!("expected classification, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_returns_raw_prediction() {
        let p = pipeline(one_hand(0.3), ScriptedClassifier::fixed(0, 0.55));
        let prediction = p.classify_snapshot(&vector(0.3)).unwrap();
        assert_eq!(prediction.label.as_char(), 'A');
        assert!((0.0..=1.0).contains(&prediction.confidence));
    }

    struct RecordingSink {
        seen: Mutex<Vec<char>>,
        fail: bool,
    }

    #[async_trait]
    impl SignSink for RecordingSink {
        async fn on_sign(&self, sign: &EmittedSign) -> Result<(), CoreError> {
            self.seen.lock().push(sign.label.as_char());
            if self.fail {
                return Err(CoreError::Speech("device busy".to_string()));
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn dispatch_reaches_every_sink() {
        let failing = Arc::new(RecordingSink {
            seen: Mutex::new(Vec::new()),
            fail: true,
        });
        let healthy = Arc::new(RecordingSink {
            seen: Mutex::new(Vec::new()),
            fail: false,
        });
        let sinks: Vec<Arc<dyn SignSink>> = vec![failing.clone(), healthy.clone()];

        let mut stream = SignStream::default();
        let sign = stream
            .apply_prediction(&Prediction {
                label: signtalk_core::models::label::SignLabel::from_char('K').unwrap(),
                confidence: 0.9,
            })
            .unwrap();

        assert_eq!(dispatch(&sinks, &sign).await, 1);
        assert_eq!(*failing.seen.lock(), vec!['K']);
        assert_eq!(*healthy.seen.lock(), vec!['K']);
    }
}
