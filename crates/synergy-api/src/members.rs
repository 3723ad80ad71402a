use synergy_types::api::{AddMemberRequest, MemberResponse};

use crate::client::ApiClient;
use crate::error::ApiError;

pub async fn list_members(
    client: &ApiClient,
    token: &str,
    project_id: i64,
) -> Result<Vec<MemberResponse>, ApiError> {
    client
        .get_json(&format!("/api/v1/projects/{project_id}/members"), token)
        .await
}

/// Add a member by email. The backend finds or creates the user record.
pub async fn add_member(
    client: &ApiClient,
    token: &str,
    project_id: i64,
    email: &str,
) -> Result<MemberResponse, ApiError> {
    let body = AddMemberRequest {
        email: email.to_string(),
    };
    client
        .post_json(
            &format!("/api/v1/projects/{project_id}/members"),
            Some(token),
            &body,
        )
        .await
}
