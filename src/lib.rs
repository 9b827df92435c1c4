//! # League Stats
//!
//! Statistics aggregation and ranking for a sports league.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (teams, players, games, stat lines)
//! - **calculate**: Pure aggregation, standings, tier and leaderboard computation
//! - **storage**: Record store trait with in-memory and JSONL implementations
//! - **engine**: Serialized per-player write path and query surface
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod engine;
pub mod models;
pub mod storage;

pub use models::*;
