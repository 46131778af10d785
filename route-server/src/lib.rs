//! Rail route planner.
//!
//! Answers: "what is the shortest way by rail from this station to that
//! one, and which railways does it use?" Networks are loaded from JSON
//! documents, typically produced by the offline `ingest` pipeline, and
//! queried over HTTP.

pub mod cache;
pub mod config;
pub mod domain;
pub mod ingest;
pub mod network;
pub mod planner;
pub mod web;
