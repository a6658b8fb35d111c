//! # Server Tests
//!
//! Requests are sent straight to the router with `oneshot`; no socket is
//! opened and no images are downloaded.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use marquee::server::{AppState, ServerConfig, router};
use serde_json::Value;
use std::io::Cursor;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "marquee-test-boundary";

fn app() -> axum::Router {
    router(Arc::new(AppState::new(ServerConfig::default()).unwrap()))
}

fn png(w: u32, h: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(rgb)))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

enum Part<'a> {
    File(&'a str, &'a str, Vec<u8>),
    Text(&'a str, String),
}

fn multipart(parts: Vec<Part<'_>>) -> Body {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&bytes);
            }
            Part::Text(name, text) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(text.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    Body::from(body)
}

fn post(uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(body)
        .unwrap()
}

async fn json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_analyze_reports_each_image() {
    let body = multipart(vec![
        Part::File("images", "front.png", png(200, 100, [200, 200, 200])),
        Part::File("images", "junk.png", b"junk".to_vec()),
        Part::Text("captions", r#"{"front.png": "매장 입구"}"#.to_string()),
    ]);
    let response = app().oneshot(post("/api/images/analyze", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let value = json(response).await;
    let images = value["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["status"], "analyzed");
    assert_eq!(images[0]["category"], "storefront");
    assert_eq!(images[0]["aspectRatio"], 2.0);
    assert_eq!(images[1]["status"], "failed");
    assert_eq!(images[1]["sourceRef"], "junk.png");
}

#[tokio::test]
async fn test_analyze_without_images_is_bad_request() {
    let body = multipart(vec![Part::Text("captions", "{}".to_string())]);
    let response = app().oneshot(post("/api/images/analyze", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_placement_with_no_images() {
    let response = app()
        .oneshot(post("/api/placement", multipart(Vec::new())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let value = json(response).await;
    assert_eq!(value["plan"]["sections"].as_array().unwrap().len(), 4);
    assert!(value["plan"]["imageSequence"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_poster_returns_png() {
    let body = multipart(vec![
        Part::Text(
            "request",
            r#"{"title":"Grand Opening","category":"store","storeName":"Marquee"}"#.to_string(),
        ),
        Part::File("images", "shop.png", png(300, 200, [70, 120, 180])),
    ]);
    let response = app().oneshot(post("/api/poster", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(response.headers()["x-poster-dropped-images"], "0");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let poster = image::load_from_memory(&bytes).unwrap();
    assert_eq!((poster.width(), poster.height()), (1080, 1350));
}

#[tokio::test]
async fn test_poster_rejects_bad_canvas() {
    let body = multipart(vec![Part::Text("request", r#"{"width": 10}"#.to_string())]);
    let response = app().oneshot(post("/api/poster", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_poster_rejects_bad_background() {
    let body = multipart(vec![Part::File("background", "bg.png", b"nope".to_vec())]);
    let response = app().oneshot(post("/api/poster", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_poster_skips_urls_beyond_photo_limit() {
    let mut parts: Vec<Part<'_>> = (0..4)
        .map(|_| Part::File("images", "shop.png", png(120, 80, [70, 120, 180])))
        .collect();
    parts.push(Part::Text(
        "request",
        r#"{"imageUrls":["http://127.0.0.1:9/extra.png"]}"#.to_string(),
    ));
    let response = app().oneshot(post("/api/poster", multipart(parts))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-poster-dropped-images"], "1");
}
