use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::info;

use crate::composer::ScopeComposer;
use crate::config::REFRESH_INTERVAL_SECS;
use crate::state::ScopeBoard;

/// Background task that periodically re-refreshes every group the board has
/// ever served, so standings and deltas stay current without a request
/// having to pay for the fetch.
pub struct StandingsRefresher {
    composer: Arc<ScopeComposer>,
    board: Arc<ScopeBoard>,
}

impl StandingsRefresher {
    pub fn new(composer: Arc<ScopeComposer>, board: Arc<ScopeBoard>) -> Self {
        Self { composer, board }
    }

    pub async fn run(self) {
        let mut ticker = interval(Duration::from_secs(REFRESH_INTERVAL_SECS));
        ticker.tick().await; // skip immediate first tick — nothing tracked yet

        loop {
            ticker.tick().await;
            let groups = self.board.tracked_groups();
            if groups.is_empty() {
                continue;
            }
            info!(groups = groups.len(), "refreshing tracked groups");
            for grupo_id in groups {
                // Each refresh is itself fire-and-forget per scope; failures
                // land in the slots as error states.
                self.composer.refresh(grupo_id, None);
            }
        }
    }
}
