mod api;
mod composer;
mod config;
mod error;
mod fetcher;
mod refresher;
mod standings;
mod state;
mod types;
mod weeks;

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::composer::ScopeComposer;
use crate::config::Config;
use crate::error::Result;
use crate::refresher::StandingsRefresher;
use crate::state::ScopeBoard;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // Shared backend HTTP client. No retries — a failed fetch surfaces
    // immediately as an error state.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.http_timeout_secs))
        .build()?;

    info!(
        "Backend at {} (temporada {}, season {}..{})",
        cfg.backend_api_url, cfg.temporada_id, cfg.season_start, cfg.season_end,
    );

    // --- Scope board + composer ---
    let board = ScopeBoard::new();
    let composer = ScopeComposer::new(cfg.clone(), client.clone(), Arc::clone(&board));

    // Background refresher keeps tracked groups current
    let refresher = StandingsRefresher::new(Arc::clone(&composer), Arc::clone(&board));
    tokio::spawn(async move { refresher.run().await });

    // --- HTTP API server ---
    let api_state = ApiState {
        cfg: cfg.clone(),
        client,
        board,
        composer,
    };
    let app = router(api_state);
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
