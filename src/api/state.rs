use std::sync::Arc;

use crate::calculate::Pagination;
use crate::config::AppConfig;
use crate::engine::StatsEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<StatsEngine>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(engine: Arc<StatsEngine>, config: AppConfig) -> Self {
        Self {
            engine,
            config: Arc::new(config),
        }
    }

    /// Leaderboard pagination with the configured default and cap.
    pub fn pagination(&self, page: Option<u32>, page_size: Option<u32>) -> Pagination {
        let limits = self.config.leaderboard;
        Pagination::with_limits(page, page_size, limits.page_size, limits.max_page_size)
    }
}
