//! Railway lines and their edges.

use std::fmt;

use super::station::{InvalidId, Station, check_id};

/// A unique railway line identifier (e.g. `GSG-LINE`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RailwayId(String);

impl RailwayId {
    /// Parse a railway identifier. Same rules as [`super::StationId`].
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        check_id("railway", s)?;
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RailwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RailwayId({})", self.0)
    }
}

impl fmt::Display for RailwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored connection between two consecutive stations on a railway.
///
/// The A/B orientation is fixed at storage time; routing treats the edge
/// as undirected.
#[derive(Debug, Clone, PartialEq)]
pub struct RailwayEdge {
    pub station_a: Station,
    pub station_b: Station,
    /// Track distance in kilometres. Expected to be non-negative.
    pub distance_km: f64,
}

impl RailwayEdge {
    /// Returns the endpoint opposite to `from`, or `None` if `from` is not
    /// an endpoint of this edge.
    pub fn other_end(&self, from: &super::StationId) -> Option<&Station> {
        if &self.station_a.id == from {
            Some(&self.station_b)
        } else if &self.station_b.id == from {
            Some(&self.station_a)
        } else {
            None
        }
    }
}

/// A named railway line made of an ordered list of edges.
///
/// Edges are expected to follow real-world track order, but nothing here
/// enforces that.
#[derive(Debug, Clone, PartialEq)]
pub struct Railway {
    pub id: RailwayId,
    pub name_local: String,
    pub name_english: String,
    pub edges: Vec<RailwayEdge>,
}

impl Railway {
    /// Create a railway with no edges.
    pub fn new(
        id: RailwayId,
        name_local: impl Into<String>,
        name_english: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name_local: name_local.into(),
            name_english: name_english.into(),
            edges: Vec::new(),
        }
    }

    /// Append an edge between two stations.
    pub fn add_edge(&mut self, station_a: Station, station_b: Station, distance_km: f64) {
        self.edges.push(RailwayEdge {
            station_a,
            station_b,
            distance_km,
        });
    }

    /// Builder-style variant of [`Railway::add_edge`].
    pub fn with_edge(mut self, station_a: Station, station_b: Station, distance_km: f64) -> Self {
        self.add_edge(station_a, station_b, distance_km);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, StationId};

    fn station(id: &str) -> Station {
        Station::new(
            StationId::parse(id).unwrap(),
            format!("{id}-local"),
            id,
            id,
            Coordinate::default(),
        )
    }

    #[test]
    fn parse_railway_id() {
        assert_eq!(RailwayId::parse("GSG-LINE").unwrap().as_str(), "GSG-LINE");
        let err = RailwayId::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid railway id: must not be empty");
    }

    #[test]
    fn add_edges_in_order() {
        let mut line = Railway::new(RailwayId::parse("L").unwrap(), "线", "Line");
        line.add_edge(station("A"), station("B"), 2.0);
        line.add_edge(station("B"), station("C"), 3.5);

        assert_eq!(line.edges.len(), 2);
        assert_eq!(line.edges[0].station_a.id.as_str(), "A");
        assert_eq!(line.edges[1].station_b.id.as_str(), "C");
        assert_eq!(line.edges[1].distance_km, 3.5);
    }

    #[test]
    fn with_edge_chains() {
        let line = Railway::new(RailwayId::parse("L").unwrap(), "线", "Line")
            .with_edge(station("A"), station("B"), 1.0)
            .with_edge(station("B"), station("C"), 1.0);

        let ends: Vec<&str> = line.edges.iter().map(|e| e.station_b.id.as_str()).collect();
        assert_eq!(ends, vec!["B", "C"]);
    }

    #[test]
    fn other_end() {
        let edge = RailwayEdge {
            station_a: station("A"),
            station_b: station("B"),
            distance_km: 1.0,
        };
        let a = StationId::parse("A").unwrap();
        let b = StationId::parse("B").unwrap();
        let z = StationId::parse("Z").unwrap();

        assert_eq!(edge.other_end(&a).unwrap().id, b);
        assert_eq!(edge.other_end(&b).unwrap().id, a);
        assert!(edge.other_end(&z).is_none());
    }

    #[test]
    fn empty_railway() {
        let line = Railway::new(RailwayId::parse("L").unwrap(), "线", "Line");
        assert!(line.edges.is_empty());
        assert_eq!(line.name_english, "Line");
    }
}
