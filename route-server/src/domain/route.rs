//! Route query results.

use std::sync::Arc;

use super::railway::{Railway, RailwayEdge};
use super::station::StationId;

/// One traversed edge of a route, attributed to its railway.
#[derive(Debug, Clone)]
pub struct RouteSegment {
    railway: Arc<Railway>,
    edge_index: usize,
    /// Station the segment is entered from.
    pub from: StationId,
    /// Station the segment arrives at.
    pub to: StationId,
}

impl RouteSegment {
    /// Create a segment for `railway.edges[edge_index]`.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn new(
        railway: Arc<Railway>,
        edge_index: usize,
        from: StationId,
        to: StationId,
    ) -> Option<Self> {
        if edge_index >= railway.edges.len() {
            return None;
        }
        Some(Self {
            railway,
            edge_index,
            from,
            to,
        })
    }

    /// The stored edge, in its original A/B orientation.
    pub fn edge(&self) -> &RailwayEdge {
        &self.railway.edges[self.edge_index]
    }

    /// The railway this segment was travelled on.
    pub fn railway(&self) -> &Railway {
        &self.railway
    }

    pub fn distance_km(&self) -> f64 {
        self.edge().distance_km
    }
}

/// A shortest route between two stations.
///
/// Built once per successful query and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RouteResult {
    /// Traversed segments, ordered from start to end.
    pub segments: Vec<RouteSegment>,
    /// Accumulated distance as computed by the search.
    pub total_distance_km: f64,
    /// One human-readable line per segment.
    pub path_description: Vec<String>,
}

impl RouteResult {
    /// The traversed edges in travel order.
    pub fn edges(&self) -> impl Iterator<Item = &RailwayEdge> {
        self.segments.iter().map(RouteSegment::edge)
    }

    /// Whether the route has no segments (start and end coincide).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of times the route switches railway.
    pub fn railway_changes(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|pair| pair[0].railway().id != pair[1].railway().id)
            .count()
    }
}
