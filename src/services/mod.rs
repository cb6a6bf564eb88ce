pub mod agent;
pub mod ingestion;
pub mod metrics_manager;
pub mod pdf_renderer;
pub mod prompts;
pub mod session_manager;
