// THEORY:
// The `routes` module is the HTTP surface. It exposes the latest result, the
// catalog, gesture metadata and illustration files, accepts landmark frames, and
// streams label changes over a websocket. Every handler is a plain async
// function over `AppState`, so tests can call them directly.

use std::io::ErrorKind;
use std::path::Path as FsPath;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use mudra_vision::pipeline::{LandmarkFrame, OfferOutcome, Published, change_stream};
use mudra_vision::{LandmarkSet, MudraInfo, describe};
use serde::Serialize;
use tracing::{debug, warn};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/current_mudra", get(current_mudra))
        .route("/mudra_list", get(mudra_list))
        .route("/mudra_info/:name", get(mudra_info))
        .route("/images/:file", get(image))
        .route("/landmarks", post(post_landmarks))
        .route("/ws/labels", get(ws_labels))
        .route("/healthz", get(healthz))
        .with_state(state)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentMudra {
    pub mudra: String,
    /// Seconds since the Unix epoch at which the result was published.
    pub timestamp: f64,
}

impl From<&Published> for CurrentMudra {
    fn from(published: &Published) -> Self {
        Self {
            mudra: published.classification.to_string(),
            timestamp: published.timestamp_millis as f64 / 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MudraList {
    pub mudras: Vec<String>,
    pub count: usize,
}

pub async fn current_mudra(State(state): State<AppState>) -> Json<CurrentMudra> {
    Json(CurrentMudra::from(&state.results.latest()))
}

pub async fn mudra_list(State(state): State<AppState>) -> Json<MudraList> {
    Json(MudraList {
        mudras: state.labels.to_vec(),
        count: state.labels.len(),
    })
}

pub async fn mudra_info(Path(name): Path<String>) -> Json<MudraInfo> {
    Json(describe(&name))
}

fn content_type(file: &str) -> &'static str {
    match FsPath::new(file).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => "image/jpeg",
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
        Some(ext) if ext.eq_ignore_ascii_case("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// A bare file name: no separators and no parent references.
fn is_plain_file_name(file: &str) -> bool {
    !file.is_empty() && !file.contains(['/', '\\']) && !file.contains("..")
}

pub async fn image(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    if !is_plain_file_name(&file) {
        return (StatusCode::BAD_REQUEST, "invalid image name").into_response();
    }
    match tokio::fs::read(state.image_dir.join(&file)).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response(),
        Err(err) if err.kind() == ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            warn!(%err, file = %file, "Failed to read image");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Validates a frame and offers it to the producer without waiting.
pub async fn post_landmarks(State(state): State<AppState>, Json(frame): Json<LandmarkFrame>) -> Response {
    if let Some(points) = frame.landmarks.as_deref() {
        if let Err(err) = LandmarkSet::from_slice(points) {
            return (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response();
        }
    }
    match state.frames.offer(frame) {
        OfferOutcome::Accepted => StatusCode::ACCEPTED.into_response(),
        OfferOutcome::Dropped => (StatusCode::SERVICE_UNAVAILABLE, "classifier busy; frame dropped").into_response(),
        OfferOutcome::Closed => (StatusCode::SERVICE_UNAVAILABLE, "classifier stopped").into_response(),
    }
}

pub async fn ws_labels(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| stream_labels(socket, state))
}

async fn stream_labels(socket: WebSocket, state: AppState) {
    let mut changes = Box::pin(change_stream(state.changes.subscribe()));
    let (mut outgoing, mut incoming) = socket.split();

    // --- 1. Current Value ---
    let current = CurrentMudra::from(&state.results.latest());
    if send_json(&mut outgoing, &current).await.is_err() {
        return;
    }

    // --- 2. Changes Until Either Side Closes ---
    loop {
        tokio::select! {
            next = changes.next() => {
                let Some(published) = next else { break };
                if send_json(&mut outgoing, &CurrentMudra::from(&published)).await.is_err() {
                    break;
                }
            }
            message = incoming.next() => {
                match message {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }
    debug!("Label stream closed");
}

async fn send_json(outgoing: &mut SplitSink<WebSocket, Message>, value: &CurrentMudra) -> Result<(), axum::Error> {
    match serde_json::to_string(value) {
        Ok(text) => outgoing.send(Message::Text(text)).await,
        Err(err) => {
            warn!(%err, "Failed to encode label update");
            Ok(())
        }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}
