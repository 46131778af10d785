//! Build network artifacts for one railway line.
//!
//! Configured through `TABLE_URL`, `LINE_NAME`, `OSM_RELATION_ID`,
//! `OSM_API_URL`, `OUTPUT_DIR` and `FILE_PREFIX`; unset variables use the
//! Hangzhou-Shenzhen line defaults.

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use route_server::ingest::{self, IngestConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = IngestConfig::default();
    if let Ok(url) = std::env::var("TABLE_URL") {
        config = config.with_table_url(url);
    }
    if let Ok(name) = std::env::var("LINE_NAME") {
        config = config.with_line_name(name);
    }
    if let Ok(id) = std::env::var("OSM_RELATION_ID") {
        config = config.with_relation_id(id);
    }
    if let Ok(url) = std::env::var("OSM_API_URL") {
        config = config.with_osm_api_url(url);
    }
    if let Ok(dir) = std::env::var("OUTPUT_DIR") {
        config = config.with_output_dir(dir);
    }
    if let Ok(prefix) = std::env::var("FILE_PREFIX") {
        config = config.with_file_prefix(prefix);
    }

    let (paths, result) = ingest::run(&config).await?;

    info!(
        path = %paths.table_stations.display(),
        stations = result.table_stations.len(),
        "table stations"
    );
    info!(
        path = %paths.line.display(),
        stations = result.line_stations.len(),
        edges = result.line_edges.len(),
        "matched line"
    );
    info!(
        path = %paths.osm_stations.display(),
        stations = result.osm_stations.len(),
        "OSM stations"
    );
    Ok(())
}
