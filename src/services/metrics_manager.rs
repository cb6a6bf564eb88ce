use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub uploads_received: u64,
    pub resumes_generated: u64,
    pub chat_messages: u64,
    pub agent_failures: u64,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_upload(&self) {
        self.inner.write().await.uploads_received += 1;
    }

    pub async fn record_resume_generated(&self) {
        self.inner.write().await.resumes_generated += 1;
    }

    pub async fn record_chat_message(&self) {
        self.inner.write().await.chat_messages += 1;
    }

    pub async fn record_agent_failure(&self) {
        self.inner.write().await.agent_failures += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counters_increment_independently() {
        let metrics = MetricsManager::new();
        metrics.record_upload().await;
        metrics.record_upload().await;
        metrics.record_resume_generated().await;

        let data = metrics.get_metrics().await;
        assert_eq!(data.uploads_received, 2);
        assert_eq!(data.resumes_generated, 1);
        assert_eq!(data.chat_messages, 0);
        assert_eq!(data.agent_failures, 0);
    }
}
