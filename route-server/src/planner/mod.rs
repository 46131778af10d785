//! Shortest-route planning over the rail network.
//!
//! This module implements the core route planning algorithm that answers:
//! "what is the shortest way by rail from this station to that one?"
//!
//! The railways are expanded into a bidirectional multigraph, Dijkstra's
//! algorithm finds distances and predecessor links, and the predecessor
//! trace is turned into an ordered list of segments with a description
//! naming each segment's railway.

mod config;
mod dijkstra;
mod graph;
mod reconstruct;
mod search;


pub use config::PlannerConfig;
pub use dijkstra::{Predecessor, ShortestPaths, shortest_paths};
pub use graph::{DirectedArc, InvalidEdgeWeight, NetworkGraph};
pub use reconstruct::{BrokenTrace, describe_segment, reconstruct};
pub use search::{RouteError, RoutePlanner, plan_route};
