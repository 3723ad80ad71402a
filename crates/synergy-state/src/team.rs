use synergy_api::{ApiClient, ApiError, members};
use synergy_types::models::Member;

use crate::loader::LoadState;
use crate::retry::with_membership_retry;

/// The membership roster for one project.
#[derive(Debug)]
pub struct TeamPanel {
    project_id: i64,
    pub members: Vec<Member>,
    loads: LoadState,
}

impl TeamPanel {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            members: Vec::new(),
            loads: LoadState::new(),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.loads.clone()
    }

    pub async fn load(&mut self, client: &ApiClient, token: &str) -> Result<(), ApiError> {
        let ticket = self.loads.begin();
        let fetched = with_membership_retry(client, token, self.project_id, || {
            members::list_members(client, token, self.project_id)
        })
        .await?;
        if self.loads.is_current(ticket) {
            self.members = fetched.into_iter().map(Member::from).collect();
        }
        Ok(())
    }

    /// Add a member by email, then reload the roster in full.
    pub async fn add_member(
        &mut self,
        client: &ApiClient,
        token: &str,
        email: &str,
    ) -> Result<(), ApiError> {
        members::add_member(client, token, self.project_id, email).await?;
        self.load(client, token).await
    }
}
