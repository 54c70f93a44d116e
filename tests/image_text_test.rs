use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fb_event_scraper::app::ports::ImageTextPort;
use fb_event_scraper::error::ScraperError;
use fb_event_scraper::infra::HttpImageText;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Content types the OCR route was handed, in call order
type Forwarded = Arc<Mutex<Vec<String>>>;

async fn image(Path(name): Path<String>) -> Response {
    if name.starts_with("missing") {
        return StatusCode::NOT_FOUND.into_response();
    }
    let content_type = if name.ends_with(".png") { "image/png" } else { "image/jpeg" };
    ([(header::CONTENT_TYPE, content_type)], name.into_bytes()).into_response()
}

/// Replies according to which image's bytes it was sent
async fn ocr(State(forwarded): State<Forwarded>, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    forwarded.lock().await.push(content_type);

    let name = String::from_utf8_lossy(&body).to_string();
    if name.starts_with("flyer") {
        Json(json!({ "text": "  FRIDAY, AUGUST 15TH\n9 PM\n$10 cover \n" }))
    } else if name.starts_with("blank") {
        Json(json!({ "text": "   " }))
    } else {
        Json(json!({}))
    }
}

/// Starts a local server with an image host and an OCR endpoint
fn spawn_services() -> Result<(String, Forwarded)> {
    let forwarded: Forwarded = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/images/:name", get(image))
        .route("/ocr", post(ocr))
        .with_state(forwarded.clone());

    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let server = axum::Server::from_tcp(listener)?.serve(app.into_make_service());
    tokio::spawn(server);

    Ok((format!("http://{addr}"), forwarded))
}

fn image_text(base: &str) -> Result<HttpImageText> {
    Ok(HttpImageText::new(format!("{base}/ocr"), Duration::from_secs(5))?)
}

#[tokio::test]
async fn flyer_text_is_returned_trimmed() -> Result<()> {
    let (base, forwarded) = spawn_services()?;
    let text = image_text(&base)?
        .extract_text(&format!("{base}/images/flyer.png"))
        .await?;

    assert_eq!(text.as_deref(), Some("FRIDAY, AUGUST 15TH\n9 PM\n$10 cover"));
    assert_eq!(*forwarded.lock().await, vec!["image/png".to_string()]);
    Ok(())
}

#[tokio::test]
async fn image_content_type_is_forwarded() -> Result<()> {
    let (base, forwarded) = spawn_services()?;
    image_text(&base)?
        .extract_text(&format!("{base}/images/flyer.jpg"))
        .await?;
    assert_eq!(*forwarded.lock().await, vec!["image/jpeg".to_string()]);
    Ok(())
}

#[tokio::test]
async fn blank_or_missing_text_is_none() -> Result<()> {
    let (base, _) = spawn_services()?;
    let client = image_text(&base)?;
    assert_eq!(client.extract_text(&format!("{base}/images/blank.jpg")).await?, None);
    assert_eq!(client.extract_text(&format!("{base}/images/photo.jpg")).await?, None);
    Ok(())
}

#[tokio::test]
async fn missing_image_is_an_acquisition_error() -> Result<()> {
    let (base, forwarded) = spawn_services()?;
    let result = image_text(&base)?
        .extract_text(&format!("{base}/images/missing.jpg"))
        .await;

    assert!(
        matches!(result, Err(ScraperError::ImageAcquisition { .. })),
        "unexpected result: {result:?}"
    );
    // nothing was sent to OCR
    assert!(forwarded.lock().await.is_empty());
    Ok(())
}
