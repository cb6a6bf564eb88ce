// src/routes/mod.rs
pub mod chat;
pub mod download;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::services::ingestion::{MAX_FILE_BYTES, MAX_FILES};
use crate::state::SharedState;
use chat::{chat_handler, get_metrics_handler, upload_handler};
use download::download_handler;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/upload", post(upload_handler))
        .route("/download", get(download_handler))
        .route("/metrics", get(get_metrics_handler))
        .route("/health", get(|| async { "OK" }))
        // two files plus multipart framing overhead
        .layer(DefaultBodyLimit::max(MAX_FILES * MAX_FILE_BYTES + 64 * 1024))
        .layer(TraceLayer::new_for_http())
}
