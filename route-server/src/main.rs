use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use route_server::cache::CachedGraphs;
use route_server::config::ServerConfig;
use route_server::network::JsonNetworkFile;
use route_server::planner::PlannerConfig;
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    // Load the network (fail fast if unavailable)
    let network = match config.line.clone() {
        Some(line) => JsonNetworkFile::open_with_line(&config.network_file, line).await?,
        None => JsonNetworkFile::open(&config.network_file).await?,
    };

    let state = AppState::new(
        network,
        PlannerConfig::default(),
        CachedGraphs::new(&config.cache),
    );

    // Periodically re-read the document; a failed reload keeps the old data
    if let Some(period) = config.reload_interval {
        let network = Arc::clone(&state.network);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                if let Err(e) = network.reload().await {
                    warn!(error = %e, "failed to reload network");
                }
            }
        });
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "route planner listening");
    info!("endpoints: GET /health, /route?from=&to=, /stations/:id, /distance?from=&to=");

    axum::serve(listener, app).await?;
    Ok(())
}
