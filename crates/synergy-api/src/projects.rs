use chrono::NaiveDate;
use synergy_types::api::{CreateProjectRequest, ProjectResponse};

use crate::client::ApiClient;
use crate::error::ApiError;

pub async fn list_projects(
    client: &ApiClient,
    token: &str,
) -> Result<Vec<ProjectResponse>, ApiError> {
    client.get_json("/api/v1/projects", token).await
}

pub async fn create_project(
    client: &ApiClient,
    token: &str,
    name: &str,
    description: &str,
    due_date: Option<NaiveDate>,
) -> Result<ProjectResponse, ApiError> {
    let body = CreateProjectRequest {
        name: name.to_string(),
        description: description.to_string(),
        due_date,
    };
    client.post_json("/api/v1/projects", Some(token), &body).await
}

/// Join a project as the calling user. Idempotent on the backend; answers
/// 204 either way.
pub async fn join_project(client: &ApiClient, token: &str, project_id: i64) -> Result<(), ApiError> {
    client
        .post_empty(&format!("/api/v1/projects/{project_id}/join"), token)
        .await
}
