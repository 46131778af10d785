//! Writing ingestion results to disk.
//!
//! Three pretty-printed JSON files are produced per run:
//!
//! - `{prefix}-table-stations.json`: every table station
//! - `{prefix}-line-filtered.json`: matched stations and their edges, in
//!   the form [`JsonNetworkFile::open_with_line`] loads
//! - `{prefix}-osm-stations.json`: every station-like OSM point
//!
//! [`JsonNetworkFile::open_with_line`]: crate::network::JsonNetworkFile::open_with_line

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use crate::network::{EdgeRecord, StationRecord};

use super::error::IngestError;
use super::reconcile::{OsmStationRecord, Reconciliation};

/// Where the data came from, recorded in every artifact.
#[derive(Debug, Clone)]
pub struct Sources {
    pub table_url: String,
    pub osm_relation_url: String,
}

/// Output file locations.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub table_stations: PathBuf,
    pub line: PathBuf,
    pub osm_stations: PathBuf,
}

impl ArtifactPaths {
    /// Paths for `prefix` inside `dir`.
    pub fn new(dir: impl AsRef<Path>, prefix: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            table_stations: dir.join(format!("{prefix}-table-stations.json")),
            line: dir.join(format!("{prefix}-line-filtered.json")),
            osm_stations: dir.join(format!("{prefix}-osm-stations.json")),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TableArtifact<'a> {
    generated_at: &'a str,
    source_url: &'a str,
    stations: &'a [StationRecord],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LineArtifact<'a> {
    generated_at: &'a str,
    table_source: &'a str,
    osm_relation: &'a str,
    stations: &'a [StationRecord],
    edges: &'a [EdgeRecord],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OsmArtifact<'a> {
    generated_at: &'a str,
    osm_relation: &'a str,
    stations: &'a [OsmStationRecord],
}

/// Write all three artifacts, creating the output directory if needed.
pub async fn write_artifacts(
    paths: &ArtifactPaths,
    sources: &Sources,
    result: &Reconciliation,
    generated_at: DateTime<Utc>,
) -> Result<(), IngestError> {
    let generated_at = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    let table = TableArtifact {
        generated_at: &generated_at,
        source_url: &sources.table_url,
        stations: &result.table_stations,
    };
    write_json(&paths.table_stations, &table).await?;

    let line = LineArtifact {
        generated_at: &generated_at,
        table_source: &sources.table_url,
        osm_relation: &sources.osm_relation_url,
        stations: &result.line_stations,
        edges: &result.line_edges,
    };
    write_json(&paths.line, &line).await?;

    let osm = OsmArtifact {
        generated_at: &generated_at,
        osm_relation: &sources.osm_relation_url,
        stations: &result.osm_stations,
    };
    write_json(&paths.osm_stations, &osm).await?;

    info!(
        table_stations = result.table_stations.len(),
        line_stations = result.line_stations.len(),
        edges = result.line_edges.len(),
        osm_stations = result.osm_stations.len(),
        "wrote artifacts"
    );
    Ok(())
}

async fn write_json(path: &Path, value: &impl Serialize) -> Result<(), IngestError> {
    let io_error = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json).await.map_err(io_error)?;
    Ok(())
}
