use synergy_api::{ApiClient, ApiError, messages};
use synergy_types::models::Message;

use crate::loader::LoadState;
use crate::retry::with_membership_retry;

/// Project chat: an append-only message list, oldest first.
///
/// Sending has no optimistic local append: ids and ordering are assigned
/// by the server, so the list is refetched after every send. Correctness
/// over latency.
#[derive(Debug)]
pub struct ChatPanel {
    project_id: i64,
    pub messages: Vec<Message>,
    loads: LoadState,
}

impl ChatPanel {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            messages: Vec::new(),
            loads: LoadState::new(),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.loads.clone()
    }

    pub async fn load(&mut self, client: &ApiClient, token: &str) -> Result<(), ApiError> {
        let ticket = self.loads.begin();
        let fetched = with_membership_retry(client, token, self.project_id, || {
            messages::list_messages(client, token, self.project_id)
        })
        .await?;
        if self.loads.is_current(ticket) {
            self.messages = Message::list_from_wire(fetched);
        }
        Ok(())
    }

    pub async fn send(
        &mut self,
        client: &ApiClient,
        token: &str,
        content: &str,
    ) -> Result<(), ApiError> {
        messages::post_message(client, token, self.project_id, content).await?;
        self.load(client, token).await
    }
}
