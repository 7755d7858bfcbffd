// Learnify Web Server
// Copyright (c) 2026 Xing_The_Creator | Learnify

use axum::{
    extract::{Query, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;
use tracing::{error, info};

use crate::lesson::{prepare_lesson, Severity};
use crate::media::{confine_to_dir, validate_stream_path};
use crate::page;
use crate::state::LearnifyState;

pub type AppState = Arc<LearnifyState>;

#[derive(Deserialize)]
pub struct PageParams {
    pub topic: Option<String>,
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub status: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Serialize)]
pub struct TopicEntry {
    pub keyword: String,
    pub video: String,
}

#[derive(Deserialize)]
pub struct TextRequest {
    pub prompt: String,
}

#[derive(Serialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}

#[derive(Deserialize)]
struct StreamParams {
    path: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/generate", post(handle_generate))
        .route("/api/topics", get(list_topics))
        .route("/api/stream", get(stream_video))
        .route("/api/text", post(handle_text))
        .route("/api/speech", post(handle_speech))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let display_addr = if addr.ip().is_unspecified() {
        format!("127.0.0.1:{}", port)
    } else {
        addr.to_string()
    };
    info!("🚀 Python Learnify running on http://{}", display_addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("[SERVER] 🛑 Shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("[SERVER] Failed to listen for Ctrl+C: {}", e);
    }
}

async fn index(State(state): State<AppState>, Query(params): Query<PageParams>) -> Html<String> {
    match params.topic {
        Some(topic) => {
            let outcome = prepare_lesson(&state.resolver, &topic);
            Html(page::render(&topic, Some(&outcome)))
        }
        None => Html(page::render("", None)),
    }
}

async fn handle_generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> Json<GenerateResponse> {
    let outcome = prepare_lesson(&state.resolver, &payload.query);

    Json(GenerateResponse {
        status: outcome.severity(),
        message: outcome.message(),
        video_url: outcome.playable_asset().map(|p| page::stream_url(p)),
    })
}

async fn list_topics(State(state): State<AppState>) -> Json<Vec<TopicEntry>> {
    let topics = state
        .resolver
        .mapping()
        .entries()
        .map(|(keyword, video)| TopicEntry {
            keyword: keyword.to_string(),
            video: video.to_string(),
        })
        .collect();
    Json(topics)
}

async fn stream_video(
    State(state): State<AppState>,
    Query(params): Query<StreamParams>,
    req: Request,
) -> Response {
    let path = match validate_stream_path(&params.path, &state.video_dir) {
        Ok(p) => p,
        Err(e) => {
            error!("[SERVER] Stream access denied: {}", e);
            return (StatusCode::FORBIDDEN, e).into_response();
        }
    };

    if !path.exists() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = match confine_to_dir(&path, &state.video_dir) {
        Ok(p) => p,
        Err(e) => {
            error!("[SERVER] Stream access denied: {}", e);
            return (StatusCode::FORBIDDEN, e).into_response();
        }
    };

    let service = ServeFile::new(path);
    match service.oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(err) => {
            error!("[SERVER] ServeFile error: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn handle_text(
    State(state): State<AppState>,
    Json(payload): Json<TextRequest>,
) -> Result<Json<TextResponse>, (StatusCode, String)> {
    let Some(generator) = state.generator.as_ref() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Text generation is not configured".to_string(),
        ));
    };

    match generator.generate(&payload.prompt).await {
        Ok(text) => Ok(Json(TextResponse { text })),
        Err(e) => {
            error!("[SERVER] Text generation failed: {:#}", e);
            Err((StatusCode::BAD_GATEWAY, format!("Text generation failed: {}", e)))
        }
    }
}

async fn handle_speech(
    State(state): State<AppState>,
    Json(payload): Json<SpeechRequest>,
) -> Response {
    if payload.text.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "No text to speak").into_response();
    }

    match state.tts.synthesize(&payload.text).await {
        Ok(audio) => ([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response(),
        Err(e) => {
            error!("[SERVER] Speech synthesis failed: {:#}", e);
            (StatusCode::BAD_GATEWAY, format!("Speech synthesis failed: {}", e)).into_response()
        }
    }
}
