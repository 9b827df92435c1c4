//! Statistics calculation engine.
//!
//! Pure functions over a snapshot of league records:
//! - Season profile aggregation from box scores
//! - Team standings with tie-break ordering
//! - Tier bands over ranked standings
//! - Category leaderboards and pagination
//!
//! All arithmetic goes through [`formulas`].

pub mod aggregation;
pub mod formulas;
pub mod leaderboard;
pub mod pagination;
pub mod standings;
pub mod tiers;

pub use aggregation::{aggregate, sum_lines, StatTotals};
pub use leaderboard::{compute_leaderboard, leaderboard_value};
pub use pagination::{paginate, Page, Pagination, PaginationMeta};
pub use standings::{compute_standings, rank_order};
pub use tiers::{assign_tiers, tier_for_rank};
