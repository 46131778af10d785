//! In-memory network store.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{Railway, RailwayId, Station, StationId};

use super::NetworkRepository;
use super::error::{DecodeError, RepositoryError};

/// A railway as stored: edges hold station ids, resolved on read.
#[derive(Debug, Clone, PartialEq)]
struct StoredRailway {
    id: RailwayId,
    name_local: String,
    name_english: String,
    edges: Vec<(StationId, StationId, f64)>,
}

#[derive(Debug, Default)]
struct Store {
    stations: BTreeMap<StationId, Station>,
    railways: BTreeMap<RailwayId, StoredRailway>,
    version: u64,
}

impl Store {
    fn resolve(&self, stored: &StoredRailway) -> Result<Railway, DecodeError> {
        let mut railway = Railway::new(
            stored.id.clone(),
            stored.name_local.clone(),
            stored.name_english.clone(),
        );
        for (a, b, distance_km) in &stored.edges {
            let station_a = self.station(&stored.id, a)?;
            let station_b = self.station(&stored.id, b)?;
            railway.add_edge(station_a, station_b, *distance_km);
        }
        Ok(railway)
    }

    fn station(&self, railway: &RailwayId, id: &StationId) -> Result<Station, DecodeError> {
        self.stations
            .get(id)
            .cloned()
            .ok_or_else(|| DecodeError::UnknownStation {
                railway: railway.to_string(),
                station: id.to_string(),
            })
    }
}

/// Thread-safe in-memory store of stations and railways.
///
/// Railways keep station references by id, so updating a station is seen
/// by every railway that uses it. Each write bumps the data version.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNetwork {
    inner: Arc<RwLock<Store>>,
}

impl InMemoryNetwork {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given railways and every station they
    /// reference.
    pub async fn from_railways(railways: impl IntoIterator<Item = Railway>) -> Self {
        let network = Self::new();
        {
            let mut store = network.inner.write().await;
            for railway in railways {
                for edge in &railway.edges {
                    for station in [&edge.station_a, &edge.station_b] {
                        store.stations.insert(station.id.clone(), station.clone());
                    }
                }
                store.railways.insert(railway.id.clone(), to_stored(&railway));
            }
            store.version += 1;
        }
        network
    }

    /// Insert or replace a station.
    pub async fn save_station(&self, station: Station) {
        let mut store = self.inner.write().await;
        debug!(station = %station.id, "saving station");
        store.stations.insert(station.id.clone(), station);
        store.version += 1;
    }

    /// Insert or replace a railway, including its whole edge list.
    ///
    /// Every station referenced by the railway must already be saved.
    pub async fn save_railway(&self, railway: &Railway) -> Result<(), RepositoryError> {
        let mut store = self.inner.write().await;

        for edge in &railway.edges {
            for id in [&edge.station_a.id, &edge.station_b.id] {
                if !store.stations.contains_key(id) {
                    return Err(DecodeError::UnknownStation {
                        railway: railway.id.to_string(),
                        station: id.to_string(),
                    }
                    .into());
                }
            }
        }

        debug!(
            railway = %railway.id,
            edges = railway.edges.len(),
            "saving railway"
        );
        store
            .railways
            .insert(railway.id.clone(), to_stored(railway));
        store.version += 1;
        Ok(())
    }

    /// Replace the whole contents of the store.
    ///
    /// Returns `false`, leaving the version as is, when the new contents
    /// equal the stored ones.
    pub async fn replace(&self, stations: Vec<Station>, railways: Vec<Railway>) -> bool {
        let stations: BTreeMap<StationId, Station> =
            stations.into_iter().map(|s| (s.id.clone(), s)).collect();
        let railways: BTreeMap<RailwayId, StoredRailway> = railways
            .iter()
            .map(|r| (r.id.clone(), to_stored(r)))
            .collect();

        let mut store = self.inner.write().await;
        if store.stations == stations && store.railways == railways {
            return false;
        }
        store.stations = stations;
        store.railways = railways;
        store.version += 1;
        true
    }

    /// Look up a railway with its edges resolved to current station records.
    pub async fn find_railway_by_id(
        &self,
        id: &RailwayId,
    ) -> Result<Option<Railway>, RepositoryError> {
        let store = self.inner.read().await;
        match store.railways.get(id) {
            Some(stored) => Ok(Some(store.resolve(stored)?)),
            None => Ok(None),
        }
    }

    /// All stations, ordered by id.
    pub async fn find_all_stations(&self) -> Vec<Station> {
        let store = self.inner.read().await;
        store.stations.values().cloned().collect()
    }
}

fn to_stored(railway: &Railway) -> StoredRailway {
    StoredRailway {
        id: railway.id.clone(),
        name_local: railway.name_local.clone(),
        name_english: railway.name_english.clone(),
        edges: railway
            .edges
            .iter()
            .map(|e| (e.station_a.id.clone(), e.station_b.id.clone(), e.distance_km))
            .collect(),
    }
}

impl NetworkRepository for InMemoryNetwork {
    async fn find_all_railways(&self) -> Result<Vec<Railway>, RepositoryError> {
        let store = self.inner.read().await;
        let railways = store
            .railways
            .values()
            .map(|stored| store.resolve(stored))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(railways)
    }

    async fn find_station_by_id(&self, id: &StationId) -> Result<Option<Station>, RepositoryError> {
        let store = self.inner.read().await;
        Ok(store.stations.get(id).cloned())
    }

    async fn data_version(&self) -> u64 {
        self.inner.read().await.version
    }
}
