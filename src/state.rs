// src/state.rs
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::agent::{Agent, AgentError};
use crate::services::metrics_manager::MetricsManager;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub agent: Agent,
    pub metrics: MetricsManager,
    pub output_dir: PathBuf,
}

impl AppState {
    pub fn new(config: &Config, session_ttl: Duration) -> Result<Self, AgentError> {
        Ok(Self {
            sessions: SessionManager::new(session_ttl),
            agent: Agent::new(config.gemini_api_key.clone(), config.agent_timeout)?,
            metrics: MetricsManager::new(),
            output_dir: config.output_dir.clone(),
        })
    }
}
