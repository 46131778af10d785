//! Bidirectional adjacency structure built from railway edge lists.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Railway, RailwayEdge, RailwayId, StationId};

/// Error returned when a railway edge has a negative or non-finite distance.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("railway {railway} edge {from} <-> {to} has invalid weight {weight}")]
pub struct InvalidEdgeWeight {
    pub railway: RailwayId,
    pub from: StationId,
    pub to: StationId,
    pub weight: f64,
}

/// One traversal direction of a railway edge.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedArc {
    /// Station this arc leads to.
    pub to: StationId,
    /// Edge distance in kilometres.
    pub weight: f64,
    /// Index of the originating railway in the graph.
    pub railway: usize,
    /// Index of the originating edge within that railway.
    pub edge: usize,
}

/// The rail network as a multigraph keyed by station id.
///
/// Every stored edge contributes two arcs with the same weight, so the
/// network is undirected for routing. Parallel edges (same station pair,
/// different railways or distances) are all kept. Stations without any
/// edge are not part of the graph.
#[derive(Debug, Default)]
pub struct NetworkGraph {
    railways: Vec<Arc<Railway>>,
    nodes: HashMap<StationId, Vec<DirectedArc>>,
    arc_count: usize,
}

impl NetworkGraph {
    /// Build the graph from a complete set of railways.
    ///
    /// With `validate_weights`, fails on the first edge whose distance is
    /// negative or not finite.
    pub fn build(
        railways: Vec<Railway>,
        validate_weights: bool,
    ) -> Result<Self, InvalidEdgeWeight> {
        let mut graph = NetworkGraph {
            railways: Vec::with_capacity(railways.len()),
            nodes: HashMap::new(),
            arc_count: 0,
        };

        for railway in railways {
            if validate_weights {
                check_weights(&railway)?;
            }
            graph.add_railway(Arc::new(railway));
        }

        debug!(
            railways = graph.railways.len(),
            stations = graph.nodes.len(),
            arcs = graph.arc_count,
            "built network graph"
        );

        Ok(graph)
    }

    fn add_railway(&mut self, railway: Arc<Railway>) {
        let railway_idx = self.railways.len();

        for (edge_idx, edge) in railway.edges.iter().enumerate() {
            let a = &edge.station_a.id;
            let b = &edge.station_b.id;

            self.nodes.entry(a.clone()).or_default().push(DirectedArc {
                to: b.clone(),
                weight: edge.distance_km,
                railway: railway_idx,
                edge: edge_idx,
            });
            self.nodes.entry(b.clone()).or_default().push(DirectedArc {
                to: a.clone(),
                weight: edge.distance_km,
                railway: railway_idx,
                edge: edge_idx,
            });
            self.arc_count += 2;
        }

        self.railways.push(railway);
    }

    /// Whether the station has at least one incident edge.
    pub fn contains(&self, station: &StationId) -> bool {
        self.nodes.contains_key(station)
    }

    /// Outgoing arcs of a station, in insertion order.
    ///
    /// Empty for stations outside the graph.
    pub fn arcs(&self, station: &StationId) -> &[DirectedArc] {
        self.nodes.get(station).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of stations in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed arcs (twice the number of stored edges).
    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    /// The railways the graph was built from.
    pub fn railways(&self) -> &[Arc<Railway>] {
        &self.railways
    }

    /// Railway by graph index.
    pub fn railway(&self, idx: usize) -> Option<&Arc<Railway>> {
        self.railways.get(idx)
    }

    /// The stored edge an arc was derived from.
    pub fn edge(&self, railway: usize, edge: usize) -> Option<&RailwayEdge> {
        self.railways.get(railway)?.edges.get(edge)
    }
}

fn check_weights(railway: &Railway) -> Result<(), InvalidEdgeWeight> {
    match railway
        .edges
        .iter()
        .find(|e| !e.distance_km.is_finite() || e.distance_km < 0.0)
    {
        Some(edge) => Err(InvalidEdgeWeight {
            railway: railway.id.clone(),
            from: edge.station_a.id.clone(),
            to: edge.station_b.id.clone(),
            weight: edge.distance_km,
        }),
        None => Ok(()),
    }
}
