//! Web layer for the route planner.
//!
//! Provides HTTP endpoints for route queries and station lookups.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
