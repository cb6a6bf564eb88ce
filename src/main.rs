use std::sync::Arc;
use std::time::Duration;

use resume_tailor::{config::Config, routes, state::AppState};
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

const SESSION_TTL: Duration = Duration::from_secs(30 * 60);
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(&config, SESSION_TTL)?);

    // Drop sessions that have gone idle.
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = sessions.purge_expired().await;
            if removed > 0 {
                debug!("purged {removed} idle sessions");
            }
        }
    });

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("resume tailor listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
