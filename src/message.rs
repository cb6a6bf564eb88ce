// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
}

#[derive(Serialize, Deserialize)]
pub struct UploadResponse {
    pub session_id: String,
    pub reply: String,
    /// Present only when a tailored resume PDF was generated.
    pub download_url: Option<String>,
}

#[derive(Deserialize)]
pub struct DownloadQuery {
    pub session_id: Option<String>,
}
