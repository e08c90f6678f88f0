// File: alerta-core/src/analytics/mod.rs

pub mod query;
pub mod stats;

pub use query::{HistoryFilter, HistoryPage, HistorySort, StatusFilter};
pub use stats::{AlertStatistics, SystemHealth, TopUser};

use std::sync::Arc;

use alerta_common::traits::repository_traits::AlertRepo;
use alerta_common::Error;

use crate::utils::time::Clock;

/// Admin-facing engine: pulls a bounded window of recent alerts and
/// derives paged views and aggregate statistics from it. All derivation
/// is pure; the only store access is the window fetch itself.
pub struct AnalyticsService {
    repo: Arc<dyn AlertRepo>,
    clock: Arc<dyn Clock>,
    /// Cap on how much history one computation may pull.
    window_limit: i64,
}

impl AnalyticsService {
    pub fn new(repo: Arc<dyn AlertRepo>, clock: Arc<dyn Clock>, window_limit: i64) -> Self {
        Self {
            repo,
            clock,
            window_limit,
        }
    }

    /// Filtered, sorted, paged history view for the admin table.
    pub async fn query_history(
        &self,
        filter: &HistoryFilter,
        sort: HistorySort,
        page: usize,
        page_size: usize,
    ) -> Result<HistoryPage, Error> {
        let window = self.repo.recent_window(self.window_limit).await?;
        Ok(query::query_history(&window, filter, sort, page, page_size))
    }

    /// Aggregate statistics (counts, response time, efficiency, health)
    /// over the unfiltered window.
    pub async fn compute_statistics(&self) -> Result<AlertStatistics, Error> {
        let window = self.repo.recent_window(self.window_limit).await?;
        Ok(stats::compute_statistics(&window, self.clock.now()))
    }
}
