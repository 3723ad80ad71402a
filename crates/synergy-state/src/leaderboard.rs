use synergy_api::{ApiClient, ApiError, analytics};
use synergy_types::models::Leader;

use crate::loader::LoadState;
use crate::retry::with_membership_retry;

/// Per-project leaderboard. Scores are computed entirely server-side;
/// the client refreshes the whole list whenever a task reaches done.
#[derive(Debug)]
pub struct Leaderboard {
    project_id: i64,
    pub leaders: Vec<Leader>,
    loads: LoadState,
}

impl Leaderboard {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            leaders: Vec::new(),
            loads: LoadState::new(),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.loads.clone()
    }

    pub async fn load(&mut self, client: &ApiClient, token: &str) -> Result<(), ApiError> {
        let ticket = self.loads.begin();
        let fetched = with_membership_retry(client, token, self.project_id, || {
            analytics::leaderboard(client, token, self.project_id)
        })
        .await?;
        if self.loads.is_current(ticket) {
            self.leaders = fetched.into_iter().map(Leader::from).collect();
        }
        Ok(())
    }
}
