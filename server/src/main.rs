//! Reservation API server.
//!
//! Run from repo root: `cargo run -p reservation-server`

use reservation_api::{app, connect, ensure_database_exists, run_migrations, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("reservation_api=info,tower_http=info")),
        )
        .init();

    ensure_database_exists(&settings.database_url).await?;
    let pool = connect(&settings).await?;
    run_migrations(&pool).await?;

    let router = app(AppState::new(pool), &settings);
    let listener = TcpListener::bind(settings.listen_addr()?).await?;
    tracing::info!("Reservation API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
