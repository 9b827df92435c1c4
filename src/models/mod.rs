//! Core data models for the league.

mod game;
mod ids;
mod leaderboard;
mod player;
mod stat_line;
mod stats;
mod team;
mod validation;

pub use game::*;
pub use ids::*;
pub use leaderboard::*;
pub use player::*;
pub use stat_line::*;
pub use stats::*;
pub use team::*;
pub use validation::*;
