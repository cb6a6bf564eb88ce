use axum::{
    Json,
    extract::{Multipart, State},
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, UploadResponse},
    services::{
        ingestion::{self, CLASSIFICATION_HINT, MAX_FILE_BYTES, MAX_FILES, UploadedFile},
        metrics_manager::MetricsData,
        pdf_renderer::render_resume_pdf,
        prompts,
        session_manager::{MessageRole, SessionData, is_valid_session_id},
    },
    state::SharedState,
};

/// Resolve the session id a client sent, or mint a fresh one.
async fn resolve_session(
    state: &SharedState,
    requested: Option<&str>,
) -> Result<String, AppError> {
    match requested {
        Some(id) if !id.trim().is_empty() => {
            let id = id.trim();
            if !is_valid_session_id(id) {
                return Err(AppError::BadRequest("Invalid session id".to_string()));
            }
            state.sessions.ensure_session(id).await;
            Ok(id.to_string())
        }
        _ => Ok(state.sessions.create_session().await),
    }
}

/// Free-text chat against the accumulated session history.
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let session_id = resolve_session(&state, payload.session_id.as_deref()).await?;

    state
        .sessions
        .append_message(&session_id, MessageRole::User, trimmed)
        .await;
    state.metrics.record_chat_message().await;

    let history = state
        .sessions
        .get_history(&session_id)
        .await
        .unwrap_or_default();

    let reply = match state.agent.chat(&history).await {
        Ok(reply) => reply,
        Err(e) => {
            state.metrics.record_agent_failure().await;
            return Err(e.into());
        }
    };

    state
        .sessions
        .append_message(&session_id, MessageRole::Assistant, &reply)
        .await;

    Ok(Json(ChatResponse { session_id, reply }))
}

/// Upload resume + job description, tailor, and render the PDF.
pub async fn upload_handler(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut requested_session: Option<String> = None;
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart request: {e}")))?
    {
        let file_name = field.file_name().map(str::to_string);
        let field_name = field.name().map(str::to_string);

        if let Some(name) = file_name {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read '{name}': {e}")))?;
            if bytes.len() > MAX_FILE_BYTES {
                return Err(AppError::BadRequest(format!(
                    "'{name}' exceeds the 5 MB upload limit"
                )));
            }
            files.push(UploadedFile {
                name,
                bytes: bytes.to_vec(),
            });
        } else if field_name.as_deref() == Some("session_id") {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid session_id field: {e}")))?;
            requested_session = Some(value);
        }
        // other text fields are ignored
    }

    if files.is_empty() || files.len() > MAX_FILES {
        return Err(AppError::BadRequest(format!(
            "Please upload your resume and the job description (at most {MAX_FILES} files)"
        )));
    }

    let session_id = resolve_session(&state, requested_session.as_deref()).await?;
    state.metrics.record_upload().await;

    // Classification failure leaves the session untouched so the user can
    // simply re-upload with better file names.
    let Some((resume_text, jd_text)) = ingestion::ingest(&files)?.into_texts() else {
        return Ok(Json(UploadResponse {
            session_id,
            reply: CLASSIFICATION_HINT.to_string(),
            download_url: None,
        }));
    };

    let prompt = prompts::build_tailoring_prompt(&resume_text, &jd_text);
    let reply = match state.agent.tailor(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            state.metrics.record_agent_failure().await;
            return Err(e.into());
        }
    };

    render_resume_pdf(&state.output_dir, &session_id, &reply).await?;
    state.metrics.record_resume_generated().await;

    state
        .sessions
        .set_data(
            &session_id,
            SessionData {
                resume_text: Some(resume_text),
                jd_text: Some(jd_text),
            },
        )
        .await;
    // Keep the exchange in the history so follow-up chat has context.
    state
        .sessions
        .append_message(&session_id, MessageRole::User, &prompt)
        .await;
    state
        .sessions
        .append_message(&session_id, MessageRole::Assistant, &reply)
        .await;

    Ok(Json(UploadResponse {
        download_url: Some(format!("/download?session_id={session_id}")),
        session_id,
        reply,
    }))
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
