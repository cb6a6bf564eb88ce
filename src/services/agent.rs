//! Client for the remote tailoring model. All LLM calls go through here.
//!
//! The model is reached over Gemini's OpenAI-compatible chat-completions
//! surface; requests are non-streaming and carry the fixed system
//! instruction plus either a single prompt or the session history.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::prompts::SYSTEM_INSTRUCTION;
use super::session_manager::{Message, MessageRole};

const GEMINI_OPENAI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
pub const MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned no choices")]
    EmptyChoices,
}

impl AgentError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, AgentError::Http(e) if e.is_timeout())
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

/// The remote tailoring model behind a timeout-bounded HTTP client.
#[derive(Clone)]
pub struct Agent {
    client: Client,
    api_key: String,
}

impl Agent {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, AgentError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }

    /// One-shot tailoring request: system instruction plus a single prompt.
    pub async fn tailor(&self, prompt: &str) -> Result<String, AgentError> {
        self.complete(vec![ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }])
        .await
    }

    /// Conversational request carrying the full session history.
    pub async fn chat(&self, history: &[Message]) -> Result<String, AgentError> {
        let messages = history
            .iter()
            .map(|m| ChatMessage {
                role: match m.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: m.content.clone(),
            })
            .collect();
        self.complete(messages).await
    }

    async fn complete(&self, mut messages: Vec<ChatMessage>) -> Result<String, AgentError> {
        messages.insert(
            0,
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_INSTRUCTION.to_string(),
            },
        );
        debug!("sending {} messages to {MODEL}", messages.len());

        let request = ChatCompletionRequest {
            model: MODEL,
            messages,
        };

        let resp = self
            .client
            .post(GEMINI_OPENAI_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatCompletionResponse = resp.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(AgentError::EmptyChoices)
    }
}
