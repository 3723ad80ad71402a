use synergy_types::api::LeaderResponse;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Per-project leaderboard, scored server-side from completed tasks.
pub async fn leaderboard(
    client: &ApiClient,
    token: &str,
    project_id: i64,
) -> Result<Vec<LeaderResponse>, ApiError> {
    client
        .get_json(&format!("/api/v1/analytics/leaderboard/{project_id}"), token)
        .await
}
