//! JSON network documents on disk.
//!
//! The document schema mirrors what the ingestion pipeline writes:
//!
//! ```json
//! {
//!   "stations": [{ "id": "GSG-001", "nameLocal": "广州南", "nameRomaji": "Guangzhounan",
//!                  "nameEnglish": "Guangzhou South",
//!                  "location": { "latitude": 22.99, "longitude": 113.26 },
//!                  "hasPassengerService": true }],
//!   "railways": [{ "id": "GSG-LINE", "nameLocal": "广深港高速线",
//!                  "nameEnglish": "Guangshengang Highspeed Line",
//!                  "edges": [{ "station1Id": "GSG-001", "station2Id": "GSG-003",
//!                              "distance": 25.1 }] }]
//! }
//! ```
//!
//! A "filtered line" artifact has top-level `edges` instead of `railways`;
//! those are wrapped into a single railway described by a [`LineSpec`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Coordinate, Railway, RailwayId, Station, StationId};

use super::NetworkRepository;
use super::error::{DecodeError, RepositoryError};
use super::memory::InMemoryNetwork;

/// Stored station record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub id: String,
    pub name_local: String,
    pub name_romaji: String,
    pub name_english: String,
    pub location: LocationRecord,
    #[serde(default = "default_passenger_service")]
    pub has_passenger_service: bool,
}

fn default_passenger_service() -> bool {
    true
}

/// Stored coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationRecord {
    pub latitude: f64,
    pub longitude: f64,
}

/// Stored edge between two stations, by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub station1_id: String,
    pub station2_id: String,
    pub distance: f64,
}

/// Stored railway with its ordered edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailwayRecord {
    pub id: String,
    pub name_local: String,
    pub name_english: String,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// A whole network document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    #[serde(default)]
    pub stations: Vec<StationRecord>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub railways: Vec<RailwayRecord>,

    /// Edges of a single-line artifact.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EdgeRecord>,
}

/// Identity of the railway that top-level `edges` belong to.
#[derive(Debug, Clone)]
pub struct LineSpec {
    pub id: RailwayId,
    pub name_local: String,
    pub name_english: String,
}

impl LineSpec {
    pub fn new(
        id: RailwayId,
        name_local: impl Into<String>,
        name_english: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name_local: name_local.into(),
            name_english: name_english.into(),
        }
    }
}

/// Map a station record to a domain station.
pub fn decode_station(record: &StationRecord) -> Result<Station, DecodeError> {
    let id = StationId::parse(&record.id)?;
    let station = Station::new(
        id,
        record.name_local.clone(),
        record.name_romaji.clone(),
        record.name_english.clone(),
        Coordinate::new(record.location.latitude, record.location.longitude),
    )
    .with_passenger_service(record.has_passenger_service);
    Ok(station)
}

fn decode_edges(
    railway: &mut Railway,
    edges: &[EdgeRecord],
    stations: &HashMap<StationId, Station>,
) -> Result<(), DecodeError> {
    let lookup = |raw: &str| -> Result<Station, DecodeError> {
        let id = StationId::parse(raw)?;
        stations
            .get(&id)
            .cloned()
            .ok_or_else(|| DecodeError::UnknownStation {
                railway: railway.id.to_string(),
                station: raw.to_string(),
            })
    };

    let mut decoded = Vec::with_capacity(edges.len());
    for edge in edges {
        if !edge.distance.is_finite() || edge.distance < 0.0 {
            return Err(DecodeError::InvalidDistance {
                railway: railway.id.to_string(),
                from: edge.station1_id.clone(),
                to: edge.station2_id.clone(),
                distance: edge.distance,
            });
        }
        decoded.push((
            lookup(&edge.station1_id)?,
            lookup(&edge.station2_id)?,
            edge.distance,
        ));
    }

    for (a, b, distance) in decoded {
        railway.add_edge(a, b, distance);
    }
    Ok(())
}

/// Map a network document to domain stations and railways.
///
/// Top-level `edges` are wrapped in a railway described by `line`; if there
/// are such edges and no line is given the document is rejected.
pub fn decode_network(
    document: &NetworkDocument,
    line: Option<&LineSpec>,
) -> Result<(Vec<Station>, Vec<Railway>), DecodeError> {
    let mut stations = HashMap::with_capacity(document.stations.len());
    let mut station_order = Vec::with_capacity(document.stations.len());
    for record in &document.stations {
        let station = decode_station(record)?;
        if stations.contains_key(&station.id) {
            return Err(DecodeError::DuplicateStation(record.id.clone()));
        }
        station_order.push(station.id.clone());
        stations.insert(station.id.clone(), station);
    }

    let mut seen_railways = HashSet::new();
    let mut railways = Vec::with_capacity(document.railways.len() + 1);

    for record in &document.railways {
        let id = RailwayId::parse(&record.id)?;
        if !seen_railways.insert(id.clone()) {
            return Err(DecodeError::DuplicateRailway(record.id.clone()));
        }
        let mut railway = Railway::new(id, record.name_local.clone(), record.name_english.clone());
        decode_edges(&mut railway, &record.edges, &stations)?;
        railways.push(railway);
    }

    if !document.edges.is_empty() {
        let line = line.ok_or(DecodeError::MissingLine)?;
        if !seen_railways.insert(line.id.clone()) {
            return Err(DecodeError::DuplicateRailway(line.id.to_string()));
        }
        let mut railway = Railway::new(
            line.id.clone(),
            line.name_local.clone(),
            line.name_english.clone(),
        );
        decode_edges(&mut railway, &document.edges, &stations)?;
        railways.push(railway);
    }

    let stations = station_order
        .into_iter()
        .filter_map(|id| stations.remove(&id))
        .collect();

    Ok((stations, railways))
}

async fn read_document(path: &Path) -> Result<NetworkDocument, RepositoryError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(serde_json::from_str(&contents)?)
}

/// A network loaded from a JSON document on disk.
///
/// The document is decoded once into memory; [`JsonNetworkFile::reload`]
/// re-reads it.
#[derive(Debug, Clone)]
pub struct JsonNetworkFile {
    path: PathBuf,
    line: Option<LineSpec>,
    network: InMemoryNetwork,
}

impl JsonNetworkFile {
    /// Load a network document with a `railways` list.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        Self::open_inner(path.into(), None).await
    }

    /// Load a document whose top-level `edges` belong to `line`.
    pub async fn open_with_line(
        path: impl Into<PathBuf>,
        line: LineSpec,
    ) -> Result<Self, RepositoryError> {
        Self::open_inner(path.into(), Some(line)).await
    }

    async fn open_inner(path: PathBuf, line: Option<LineSpec>) -> Result<Self, RepositoryError> {
        let file = Self {
            path,
            line,
            network: InMemoryNetwork::new(),
        };
        file.reload().await?;
        Ok(file)
    }

    /// Re-read the document from disk.
    ///
    /// On success, replaces the in-memory network and returns the station
    /// and railway counts. On failure, the existing network is preserved.
    /// An unchanged document keeps the current data version, so cached
    /// graphs stay valid.
    pub async fn reload(&self) -> Result<(usize, usize), RepositoryError> {
        let document = read_document(&self.path).await?;
        let (stations, railways) = decode_network(&document, self.line.as_ref())?;
        let counts = (stations.len(), railways.len());

        if !self.network.replace(stations, railways).await {
            debug!(path = %self.path.display(), "network document unchanged");
            return Ok(counts);
        }

        info!(
            path = %self.path.display(),
            stations = counts.0,
            railways = counts.1,
            "loaded network document"
        );
        Ok(counts)
    }
}

impl NetworkRepository for JsonNetworkFile {
    async fn find_all_railways(&self) -> Result<Vec<Railway>, RepositoryError> {
        self.network.find_all_railways().await
    }

    async fn find_station_by_id(
        &self,
        id: &StationId,
    ) -> Result<Option<Station>, RepositoryError> {
        self.network.find_station_by_id(id).await
    }

    async fn data_version(&self) -> u64 {
        self.network.data_version().await
    }
}
