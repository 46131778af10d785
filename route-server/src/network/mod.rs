//! Access to persisted stations and railways.
//!
//! The route planner only depends on the [`NetworkRepository`] trait. Two
//! implementations are provided: an in-memory store, used directly in tests
//! and as the backing store of the other, and a JSON document on disk.

mod error;
mod file;
mod memory;

use std::future::Future;

use crate::domain::{Railway, Station, StationId};

pub use error::{DecodeError, RepositoryError};
pub use file::{
    EdgeRecord, JsonNetworkFile, LineSpec, LocationRecord, NetworkDocument, RailwayRecord,
    StationRecord, decode_network,
};
pub use memory::InMemoryNetwork;

/// Source of network data for route planning.
///
/// This abstraction allows the planner to be tested with in-memory data.
pub trait NetworkRepository: Send + Sync {
    /// All railways, each with its full ordered edge list and resolved
    /// station records.
    fn find_all_railways(
        &self,
    ) -> impl Future<Output = Result<Vec<Railway>, RepositoryError>> + Send;

    /// Look up a single station.
    fn find_station_by_id(
        &self,
        id: &StationId,
    ) -> impl Future<Output = Result<Option<Station>, RepositoryError>> + Send;

    /// A token that changes whenever the stored network changes.
    ///
    /// Used to key cached graphs.
    fn data_version(&self) -> impl Future<Output = u64> + Send;
}
