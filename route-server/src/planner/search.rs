//! Shortest-route queries against a network repository.
//!
//! Each query loads all railways, builds (or reuses) the graph, runs the
//! search and rebuilds the path. The repository call is the only await
//! point; everything after it is synchronous.

use std::sync::Arc;

use tracing::{debug, error, trace};

use crate::cache::CachedGraphs;
use crate::domain::{RailwayId, RouteResult, StationId};
use crate::network::{NetworkRepository, RepositoryError};

use super::config::PlannerConfig;
use super::dijkstra::shortest_paths;
use super::graph::{InvalidEdgeWeight, NetworkGraph};
use super::reconstruct::{BrokenTrace, reconstruct};

/// Error from a route query.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The station has no incident edges in the network
    #[error("unknown station {0}")]
    UnknownStation(StationId),

    /// Both stations exist but are not connected
    #[error("no path from {from} to {to}")]
    NoPathFound { from: StationId, to: StationId },

    /// The search reported success but its predecessor trace is broken
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(#[from] BrokenTrace),

    /// An edge weight is negative or non-finite
    #[error("railway {railway} has an invalid edge weight {weight} between {from} and {to}")]
    InvalidEdgeWeight {
        railway: RailwayId,
        from: StationId,
        to: StationId,
        weight: f64,
    },

    /// Loading the network failed
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<InvalidEdgeWeight> for RouteError {
    fn from(e: InvalidEdgeWeight) -> Self {
        RouteError::InvalidEdgeWeight {
            railway: e.railway,
            from: e.from,
            to: e.to,
            weight: e.weight,
        }
    }
}

impl RouteError {
    /// Whether this error means "no route", as opposed to a failure.
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            RouteError::UnknownStation(_) | RouteError::NoPathFound { .. }
        )
    }
}

/// Find the shortest route on an already built graph.
///
/// Start and end must both have incident edges. `start == end` gives an
/// empty route of zero length. An end station only reachable at infinite
/// distance counts as unreachable.
pub fn plan_route(
    graph: &NetworkGraph,
    start: &StationId,
    end: &StationId,
) -> Result<RouteResult, RouteError> {
    for station in [start, end] {
        if !graph.contains(station) {
            return Err(RouteError::UnknownStation(station.clone()));
        }
    }

    let paths = shortest_paths(graph, start, end);
    trace!(
        start = %start,
        end = %end,
        settled = paths.settled_count(),
        "search finished"
    );

    if !paths.distance(end).is_some_and(f64::is_finite) {
        return Err(RouteError::NoPathFound {
            from: start.clone(),
            to: end.clone(),
        });
    }

    let result = reconstruct(graph, &paths, start, end).inspect_err(|e| {
        error!(
            start = %start,
            end = %end,
            error = %e,
            "route reconstruction failed"
        );
    })?;

    Ok(result)
}

/// Route planner over a network repository.
pub struct RoutePlanner<'a, R: NetworkRepository> {
    repository: &'a R,
    config: &'a PlannerConfig,
    cache: Option<&'a CachedGraphs>,
}

impl<'a, R: NetworkRepository> RoutePlanner<'a, R> {
    /// Create a planner that rebuilds the graph for every query.
    pub fn new(repository: &'a R, config: &'a PlannerConfig) -> Self {
        Self {
            repository,
            config,
            cache: None,
        }
    }

    /// Reuse graphs from `cache` while the repository's data version is
    /// unchanged.
    pub fn with_cache(mut self, cache: &'a CachedGraphs) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Find the shortest route between two stations.
    pub async fn find_shortest_path(
        &self,
        start: &StationId,
        end: &StationId,
    ) -> Result<RouteResult, RouteError> {
        let graph = self.graph().await?;
        let result = plan_route(&graph, start, end)?;

        if self.config.log_routes {
            debug!(
                start = %start,
                end = %end,
                segments = result.segments.len(),
                railway_changes = result.railway_changes(),
                total_km = result.total_distance_km,
                "route found"
            );
        }

        Ok(result)
    }

    /// Straight-line distance between two stored stations, in kilometres.
    ///
    /// Returns `None` if either station is not stored. Diagnostic only.
    pub async fn straight_line_distance(
        &self,
        a: &StationId,
        b: &StationId,
    ) -> Result<Option<f64>, RouteError> {
        let Some(a) = self.repository.find_station_by_id(a).await? else {
            return Ok(None);
        };
        let Some(b) = self.repository.find_station_by_id(b).await? else {
            return Ok(None);
        };
        Ok(Some(a.straight_line_km(&b)))
    }

    /// The graph for the repository's current data.
    pub async fn graph(&self) -> Result<Arc<NetworkGraph>, RouteError> {
        let Some(cache) = self.cache else {
            return Ok(Arc::new(self.build_graph().await?));
        };

        let version = self.repository.data_version().await;
        if let Some(graph) = cache.get(version).await {
            debug!(version, "graph cache hit");
            return Ok(graph);
        }

        let graph = Arc::new(self.build_graph().await?);

        // Only cache if nothing was written while loading
        if self.repository.data_version().await == version {
            cache.insert(version, graph.clone()).await;
        }

        Ok(graph)
    }

    async fn build_graph(&self) -> Result<NetworkGraph, RouteError> {
        let railways = self.repository.find_all_railways().await?;
        Ok(NetworkGraph::build(railways, self.config.validate_weights)?)
    }
}
