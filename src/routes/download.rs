use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::message::DownloadQuery;
use crate::services::pdf_renderer::{DOWNLOAD_FILENAME, output_path};
use crate::services::session_manager::is_valid_session_id;
use crate::state::SharedState;

pub const MISSING_RESUME_ERROR: &str = "No resume found to download.";

/// Serve the session's generated PDF, or the documented error payload.
pub async fn download_handler(
    State(state): State<SharedState>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    let Some(session_id) = query
        .session_id
        .as_deref()
        .filter(|id| is_valid_session_id(id))
    else {
        return missing_resume();
    };

    let path = output_path(&state.output_dir, session_id);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(_) => missing_resume(),
    }
}

fn missing_resume() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": MISSING_RESUME_ERROR })),
    )
        .into_response()
}
