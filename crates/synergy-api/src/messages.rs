use synergy_types::api::{MessageResponse, SendMessageRequest};

use crate::client::ApiClient;
use crate::error::ApiError;

pub async fn list_messages(
    client: &ApiClient,
    token: &str,
    project_id: i64,
) -> Result<Vec<MessageResponse>, ApiError> {
    client
        .get_json(&format!("/api/v1/projects/{project_id}/messages"), token)
        .await
}

pub async fn post_message(
    client: &ApiClient,
    token: &str,
    project_id: i64,
    content: &str,
) -> Result<MessageResponse, ApiError> {
    let body = SendMessageRequest {
        content: content.to_string(),
    };
    client
        .post_json(
            &format!("/api/v1/projects/{project_id}/messages"),
            Some(token),
            &body,
        )
        .await
}
