use synergy_api::{ApiClient, ApiError};
use tracing::warn;

use crate::board::TaskBoard;
use crate::chat::ChatPanel;
use crate::leaderboard::Leaderboard;
use crate::team::TeamPanel;

/// Everything the project detail page shows: board, chat, roster and
/// leaderboard for one project.
#[derive(Debug)]
pub struct ProjectView {
    pub board: TaskBoard,
    pub chat: ChatPanel,
    pub team: TeamPanel,
    pub leaderboard: Leaderboard,
}

impl ProjectView {
    pub fn new(project_id: i64) -> Self {
        Self {
            board: TaskBoard::new(project_id),
            chat: ChatPanel::new(project_id),
            team: TeamPanel::new(project_id),
            leaderboard: Leaderboard::new(project_id),
        }
    }

    /// Load every tab of the page. Tasks, roster and leaderboard are
    /// required; the chat preload alone is allowed to fail without
    /// blocking the rest of the page (it reloads the next time the chat
    /// tab is opened or a message is sent).
    pub async fn load_all(&mut self, client: &ApiClient, token: &str) -> Result<(), ApiError> {
        self.board.load(client, token).await?;
        self.team.load(client, token).await?;
        self.leaderboard.load(client, token).await?;
        if let Err(e) = self.chat.load(client, token).await {
            warn!(project_id = self.board.project_id(), "chat preload failed: {e}");
        }
        Ok(())
    }
}
