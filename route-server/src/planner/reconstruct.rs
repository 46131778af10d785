//! Path reconstruction from predecessor links.

use std::sync::Arc;

use crate::domain::{Railway, RailwayEdge, RouteResult, RouteSegment, StationId};

use super::dijkstra::ShortestPaths;
use super::graph::NetworkGraph;

/// The predecessor trace could not be followed back to the start.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("predecessor trace broken at {station} after {segments} segments")]
pub struct BrokenTrace {
    /// Station whose predecessor link was missing or unusable.
    pub station: StationId,
    /// Segments recovered before the break.
    pub segments: usize,
}

/// Render one segment of a route description.
///
/// Always shows the edge in its stored A/B orientation, whichever way it
/// was travelled.
pub fn describe_segment(railway: &Railway, edge: &RailwayEdge) -> String {
    format!(
        "[{} / {}] {} <-> {} ({}km)",
        railway.name_local,
        railway.name_english,
        edge.station_a.name_local,
        edge.station_b.name_local,
        edge.distance_km
    )
}

/// Rebuild the route from `start` to `end` out of a finished search.
///
/// The total distance is the search's distance for `end`, not a re-sum of
/// the edges. The caller must have checked that `end` was reached.
pub fn reconstruct(
    graph: &NetworkGraph,
    paths: &ShortestPaths,
    start: &StationId,
    end: &StationId,
) -> Result<RouteResult, BrokenTrace> {
    let total_distance_km = paths.distance(end).ok_or_else(|| BrokenTrace {
        station: end.clone(),
        segments: 0,
    })?;

    // Walk backwards collecting (railway, edge) pairs
    let mut links: Vec<(usize, usize)> = Vec::new();
    let mut current = end.clone();
    while &current != start {
        let broken = || BrokenTrace {
            station: current.clone(),
            segments: links.len(),
        };
        // A valid trace never visits more stations than the graph has
        if links.len() >= graph.node_count() {
            return Err(broken());
        }
        let pred = paths.predecessor(&current).ok_or_else(broken)?;
        links.push((pred.railway, pred.edge));
        current = pred.from.clone();
    }
    links.reverse();

    // Walk forwards orienting each edge from the current position
    let mut segments = Vec::with_capacity(links.len());
    let mut path_description = Vec::with_capacity(links.len());
    let mut position = start.clone();

    for (railway_idx, edge_idx) in links {
        let broken = || BrokenTrace {
            station: position.clone(),
            segments: segments.len(),
        };
        let railway: &Arc<Railway> = graph.railway(railway_idx).ok_or_else(broken)?;
        let edge = railway.edges.get(edge_idx).ok_or_else(broken)?;
        let next = edge.other_end(&position).ok_or_else(broken)?.id.clone();

        path_description.push(describe_segment(railway, edge));
        let segment = RouteSegment::new(railway.clone(), edge_idx, position.clone(), next.clone())
            .ok_or_else(broken)?;
        segments.push(segment);
        position = next;
    }

    Ok(RouteResult {
        segments,
        total_distance_km,
        path_description,
    })
}
