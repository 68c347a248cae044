use tracing::info;
use tracing_subscriber::EnvFilter;

use transfer_board::config::ServerConfig;
use transfer_board::session::{SessionDefaults, SessionStore};
use transfer_board::timetable::TimetableClient;
use transfer_board::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,transfer_board=debug")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        base_url = %config.timetable.base_url,
        timezone = ?config.timezone,
        batch_size = config.compose.batch_size,
        "Loaded configuration"
    );

    let timetable = TimetableClient::new(config.timetable.clone())?;
    let sessions = SessionStore::new(&config.sessions, SessionDefaults::default());
    let state = AppState::new(
        timetable,
        sessions,
        config.compose.clone(),
        config.refresh,
        config.timezone,
    );

    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "Transfer board listening");
    info!("  GET  /          - Journey board");
    info!("  GET  /journeys  - Board as JSON or HTML fragment");
    info!("  POST /settings  - Update stations and walking time");
    info!("  POST /load-more - Show more journeys");
    info!("  POST /reverse   - Reverse the journey");
    info!("  GET  /health    - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}
