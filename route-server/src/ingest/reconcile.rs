//! Matching table stations against an OSM relation.
//!
//! The station table supplies ids and the authoritative station list; the
//! OSM relation supplies positions and order along the line. Stations are
//! matched by normalised local name.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{Coordinate, distance, round_km};
use crate::network::{EdgeRecord, LocationRecord, StationRecord};

use super::osm::{OsmNode, OsmRelation};
use super::table::TableStation;

/// A station-like point of the relation, whether matched or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OsmStationRecord {
    pub osm_node_id: String,
    /// Name as tagged, before normalisation.
    pub name_local_raw: String,
    pub name_local: String,
    pub name_romaji: String,
    pub name_english: String,
    pub location: LocationRecord,
    pub has_passenger_service: bool,
}

/// Output of [`reconcile`].
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Every table station, with coordinates where matched and `(0, 0)`
    /// otherwise.
    pub table_stations: Vec<StationRecord>,
    /// Matched stations in relation order.
    pub line_stations: Vec<StationRecord>,
    /// Edges between consecutive matched stations.
    pub line_edges: Vec<EdgeRecord>,
    /// Every station-like point of the relation.
    pub osm_stations: Vec<OsmStationRecord>,
}

/// Match the table against the relation and derive the line's edges.
///
/// A station matched by several OSM points keeps only the first. Edge
/// distances follow the relation's node sequence between the first
/// occurrences of both stations; when the sequence does not order them,
/// the straight-line distance is used instead.
pub fn reconcile(table: &[TableStation], relation: &OsmRelation) -> Reconciliation {
    let members = relation.station_members();

    let osm_stations: Vec<OsmStationRecord> = members
        .iter()
        .map(|(_, node)| osm_station_record(node))
        .collect();

    let by_name: HashMap<&str, &TableStation> =
        table.iter().map(|s| (s.name.as_str(), s)).collect();

    let mut kept: Vec<&OsmNode> = Vec::new();
    let mut line_stations: Vec<StationRecord> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for &(_, node) in &members {
        let Some(name) = node.normalized_name().filter(|n| !n.is_empty()) else {
            continue;
        };
        let Some(table_station) = by_name.get(name.as_str()) else {
            continue;
        };
        if !seen.insert(table_station.code.as_str()) {
            debug!(station = %table_station.code, node = %node.id, "skipping repeated match");
            continue;
        }

        let english = node.english_name().unwrap_or(&name).to_string();
        kept.push(node);
        line_stations.push(StationRecord {
            id: table_station.code.clone(),
            name_local: name,
            name_romaji: english.clone(),
            name_english: english,
            location: location_record(node.location),
            has_passenger_service: table_station.has_passenger_service,
        });
    }

    let line_edges = line_edges(relation, &kept, &line_stations);

    let table_stations: Vec<StationRecord> = table
        .iter()
        .map(|s| {
            line_stations
                .iter()
                .find(|m| m.id == s.code)
                .cloned()
                .unwrap_or_else(|| StationRecord {
                    id: s.code.clone(),
                    name_local: s.name.clone(),
                    name_romaji: s.name.clone(),
                    name_english: s.name.clone(),
                    location: LocationRecord::default(),
                    has_passenger_service: s.has_passenger_service,
                })
        })
        .collect();

    let unmatched = table_stations.len() - line_stations.len();
    if unmatched > 0 {
        warn!(unmatched, "table stations without an OSM match");
    }

    Reconciliation {
        table_stations,
        line_stations,
        line_edges,
        osm_stations,
    }
}

fn line_edges(
    relation: &OsmRelation,
    kept: &[&OsmNode],
    stations: &[StationRecord],
) -> Vec<EdgeRecord> {
    let sequence = relation.node_sequence();

    let mut first_index: HashMap<&str, usize> = HashMap::new();
    for (idx, node_ref) in sequence.iter().enumerate() {
        first_index.entry(*node_ref).or_insert(idx);
    }

    kept.windows(2)
        .zip(stations.windows(2))
        .map(|(nodes, records)| {
            let (a, b) = (nodes[0], nodes[1]);
            let start = first_index.get(a.id.as_str());
            let end = first_index.get(b.id.as_str());
            let along_line = match (start, end) {
                (Some(&start), Some(&end)) if end > start => {
                    Some(sequence_distance(relation, &sequence[start..=end]))
                }
                _ => None,
            };
            let distance_km = along_line.unwrap_or_else(|| distance(a.location, b.location));

            EdgeRecord {
                station1_id: records[0].id.clone(),
                station2_id: records[1].id.clone(),
                distance: round_km(distance_km),
            }
        })
        .collect()
}

/// Sum of rounded great-circle hops along a node sequence.
///
/// Hops touching a node without a position are skipped.
fn sequence_distance(relation: &OsmRelation, sequence: &[&str]) -> f64 {
    let total: f64 = sequence
        .windows(2)
        .filter_map(|hop| {
            let a = relation.nodes.get(hop[0])?;
            let b = relation.nodes.get(hop[1])?;
            Some(distance(a.location, b.location))
        })
        .sum();
    round_km(total)
}

fn osm_station_record(node: &OsmNode) -> OsmStationRecord {
    let raw = node.local_name().unwrap_or_default().to_string();
    let normalized = node.normalized_name().unwrap_or_default();
    let fallback = if normalized.is_empty() {
        raw.clone()
    } else {
        normalized.clone()
    };
    let english = node.english_name().map(str::to_string).unwrap_or(fallback);

    OsmStationRecord {
        osm_node_id: node.id.clone(),
        name_local_raw: raw,
        name_local: normalized,
        name_romaji: english.clone(),
        name_english: english,
        location: location_record(node.location),
        has_passenger_service: true,
    }
}

fn location_record(location: Coordinate) -> LocationRecord {
    LocationRecord {
        latitude: location.latitude,
        longitude: location.longitude,
    }
}
