//! 통합 테스트 공용 헬퍼: PNG 프레임, mockito 랜드마크 서비스, HTTP 요청 빌더.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use image::{ImageFormat, Rgb, RgbImage};
use mockito::{Mock, ServerGuard};
use serde_json::Value;
use signtalk_core::config::LandmarkerConfig;
use signtalk_core::models::label::SignLabel;
use signtalk_core::models::landmark::{LandmarkVector, VECTOR_LEN};
use signtalk_core::models::window::Window;
use std::io::Cursor;
use std::path::Path;
use tower::ServiceExt;

pub const BOUNDARY: &str = "signtalk-it-boundary";

/// 단색 PNG 한 장
pub fn png_frame(shade: u8) -> Vec<u8> {
    let image = RgbImage::from_pixel(8, 8, Rgb([shade, shade, shade]));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

/// `dir`에 `frame_000.png` … 형식으로 프레임 기록
pub fn write_frames(dir: &Path, count: usize) {
    std::fs::create_dir_all(dir).unwrap();
    for i in 0..count {
        std::fs::write(dir.join(format!("frame_{i:03}.png")), png_frame(i as u8)).unwrap();
    }
}

/// 모든 좌표가 `value`인 손 하나 응답 (`None`이면 손 없음)
pub fn hands_body(value: Option<f32>) -> String {
    let hands: Vec<Value> = value
        .map(|v| {
            let points: Vec<Value> = (0..21)
                .map(|_| serde_json::json!({"x": v, "y": v, "z": v}))
                .collect();
            vec![Value::Array(points)]
        })
        .unwrap_or_default();
    serde_json::json!({ "hands": hands }).to_string()
}

/// 고정 응답 랜드마크 서비스
pub async fn landmark_service(value: Option<f32>) -> (ServerGuard, Mock) {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/landmarks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(hands_body(value))
        .create_async()
        .await;
    (server, mock)
}

pub fn landmarker_config(server: &ServerGuard) -> LandmarkerConfig {
    LandmarkerConfig {
        endpoint: format!("{}/landmarks", server.url()),
        timeout_ms: 2_000,
    }
}

pub fn label(c: char) -> SignLabel {
    SignLabel::from_char(c).unwrap()
}

pub fn window(value: f32) -> Window {
    Window::replicate(&LandmarkVector::new(vec![value; VECTOR_LEN]).unwrap())
}

// ============================================================
// HTTP
// ============================================================

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn auth_request(header: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/auth");
    if let Some(value) = header {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// `/detect` multipart 요청
pub fn detect_request(session_id: &str, image: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"sessionId\"\r\n\r\n{session_id}\r\n\
         --{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"frame.png\"\r\n\
         Content-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(image);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/detect")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// 인증 후 세션 ID 반환
pub async fn new_session(app: &Router) -> String {
    let (status, body) = send(app, auth_request(Some("Bearer integration"))).await;
    assert_eq!(status, StatusCode::OK);
    body["sessionId"].as_str().unwrap().to_string()
}
