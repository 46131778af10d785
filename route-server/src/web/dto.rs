//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{RouteResult, Station};

/// Query naming two stations.
#[derive(Debug, Deserialize)]
pub struct StationPairQuery {
    /// Start station id
    #[serde(default)]
    pub from: String,

    /// End station id
    #[serde(default)]
    pub to: String,
}

/// A shortest route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Traversed edges in travel order
    pub edges: Vec<EdgeResult>,

    /// Total distance in kilometres
    pub total_distance_km: f64,

    /// One line per edge, e.g. `[广深港高速线 / Guangshengang Highspeed Line] 深圳北 <-> 福田 (9.05km)`
    pub path_description: Vec<String>,
}

/// One traversed edge, in its stored orientation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeResult {
    /// Stored first station id
    pub station_a: String,

    /// Stored second station id
    pub station_b: String,

    pub distance_km: f64,

    /// Railway the edge was travelled on
    pub railway_id: String,
}

/// A station.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    pub id: String,
    pub name_local: String,
    pub name_romaji: String,
    pub name_english: String,
    pub latitude: f64,
    pub longitude: f64,
    pub has_passenger_service: bool,
}

/// Straight-line distance between two stations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResponse {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RouteResponse {
    /// Create from a domain route.
    pub fn from_route(route: &RouteResult) -> Self {
        let edges = route
            .segments
            .iter()
            .map(|segment| {
                let edge = segment.edge();
                EdgeResult {
                    station_a: edge.station_a.id.to_string(),
                    station_b: edge.station_b.id.to_string(),
                    distance_km: segment.distance_km(),
                    railway_id: segment.railway().id.to_string(),
                }
            })
            .collect();

        Self {
            edges,
            total_distance_km: route.total_distance_km,
            path_description: route.path_description.clone(),
        }
    }
}

impl StationResult {
    /// Create from a domain station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name_local: station.name_local.clone(),
            name_romaji: station.name_romaji.clone(),
            name_english: station.name_english.clone(),
            latitude: station.location.latitude,
            longitude: station.location.longitude,
            has_passenger_service: station.has_passenger_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Railway, RailwayId, StationId};
    use crate::planner::{NetworkGraph, plan_route};

    fn station(id: &str, name: &str) -> Station {
        Station::new(
            StationId::parse(id).unwrap(),
            name,
            name,
            name,
            Coordinate::new(22.6, 114.0),
        )
    }

    fn make_route(from: &str, to: &str) -> RouteResult {
        let railway = Railway::new(
            RailwayId::parse("GSG-LINE").unwrap(),
            "广深港高速线",
            "Guangshengang Highspeed Line",
        )
        .with_edge(station("GSG-004", "光明城"), station("GSG-005", "深圳北"), 14.5)
        .with_edge(station("GSG-005", "深圳北"), station("GSG-006", "福田"), 8.25);

        let graph = NetworkGraph::build(vec![railway], true).unwrap();
        plan_route(
            &graph,
            &StationId::parse(from).unwrap(),
            &StationId::parse(to).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn route_response_keeps_stored_orientation() {
        let response = RouteResponse::from_route(&make_route("GSG-006", "GSG-004"));

        assert_eq!(response.edges.len(), 2);
        assert_eq!(response.edges[0].station_a, "GSG-005");
        assert_eq!(response.edges[0].station_b, "GSG-006");
        assert_eq!(response.edges[1].station_a, "GSG-004");
        assert_eq!(response.edges[1].railway_id, "GSG-LINE");
        assert_eq!(response.total_distance_km, 22.75);
        assert_eq!(
            response.path_description[0],
            "[广深港高速线 / Guangshengang Highspeed Line] 深圳北 <-> 福田 (8.25km)"
        );
    }

    #[test]
    fn route_response_json_is_camel_case() {
        let response = RouteResponse::from_route(&make_route("GSG-004", "GSG-005"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["totalDistanceKm"], 14.5);
        assert_eq!(json["edges"][0]["stationA"], "GSG-004");
        assert_eq!(json["edges"][0]["distanceKm"], 14.5);
        assert_eq!(json["edges"][0]["railwayId"], "GSG-LINE");
        assert_eq!(json["pathDescription"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_route_serializes_empty_lists() {
        let response = RouteResponse::from_route(&make_route("GSG-005", "GSG-005"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["totalDistanceKm"], 0.0);
        assert!(json["edges"].as_array().unwrap().is_empty());
        assert!(json["pathDescription"].as_array().unwrap().is_empty());
    }

    #[test]
    fn station_result_from_station() {
        let shenzhen_north = station("GSG-005", "深圳北").with_passenger_service(false);
        let result = StationResult::from_station(&shenzhen_north);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["id"], "GSG-005");
        assert_eq!(json["nameLocal"], "深圳北");
        assert_eq!(json["latitude"], 22.6);
        assert_eq!(json["hasPassengerService"], false);
    }

    #[test]
    fn pair_query_defaults_missing_ids() {
        let query: StationPairQuery = serde_json::from_str(r#"{"from": "A"}"#).unwrap();
        assert_eq!(query.from, "A");
        assert_eq!(query.to, "");
    }
}
