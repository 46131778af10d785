//! Offline ingestion of a railway line.
//!
//! Builds network data for one line from two public sources: a station
//! table (ids, names, passenger service) and an OpenStreetMap route
//! relation (positions, order along the line, track geometry). The result
//! is written as JSON artifacts that the server can load directly.

pub mod artifacts;
pub mod client;
mod error;
pub mod names;
pub mod osm;
pub mod reconcile;
pub mod table;

use chrono::Utc;
use tracing::info;

pub use artifacts::{ArtifactPaths, Sources, write_artifacts};
pub use client::{IngestClient, IngestConfig};
pub use error::IngestError;
pub use names::normalize_station_name;
pub use osm::{OsmRelation, is_station_like};
pub use reconcile::{Reconciliation, reconcile};
pub use table::{TableStation, parse_station_table};

/// Fetch both sources, reconcile them and write the artifacts.
pub async fn run(config: &IngestConfig) -> Result<(ArtifactPaths, Reconciliation), IngestError> {
    let client = IngestClient::new(config)?;
    let (html, relation) = client.fetch_sources(config).await?;

    let table = parse_station_table(&html, &config.line_name);
    info!(
        line = %config.line_name,
        table_stations = table.len(),
        relation = %relation.id,
        "fetched sources"
    );

    let result = reconcile(&table, &relation);

    let paths = ArtifactPaths::new(&config.output_dir, &config.file_prefix);
    let sources = Sources {
        table_url: config.table_url.clone(),
        osm_relation_url: config.relation_page_url(),
    };
    write_artifacts(&paths, &sources, &result, Utc::now()).await?;

    Ok((paths, result))
}
