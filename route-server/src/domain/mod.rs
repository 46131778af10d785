//! Domain types for the rail network.
//!
//! Stations and railways are plain value objects. Identifiers are
//! validated at construction time, so code that receives a `StationId` or
//! `RailwayId` can trust it is well formed.

mod geo;
mod railway;
mod route;
mod station;

pub use geo::{Coordinate, EARTH_RADIUS_KM, distance, round_km};
pub use railway::{Railway, RailwayEdge, RailwayId};
pub use route::{RouteResult, RouteSegment};
pub use station::{InvalidId, Station, StationId};
