use synergy_types::api::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};

use crate::client::ApiClient;
use crate::error::ApiError;

pub async fn list_tasks(
    client: &ApiClient,
    token: &str,
    project_id: i64,
) -> Result<Vec<TaskResponse>, ApiError> {
    client
        .get_json(&format!("/api/v1/tasks/by-project/{project_id}"), token)
        .await
}

pub async fn create_task(
    client: &ApiClient,
    token: &str,
    task: &CreateTaskRequest,
) -> Result<TaskResponse, ApiError> {
    client.post_json("/api/v1/tasks", Some(token), task).await
}

/// Partial update; only the fields set on `update` are sent.
pub async fn update_task(
    client: &ApiClient,
    token: &str,
    task_id: i64,
    update: &UpdateTaskRequest,
) -> Result<TaskResponse, ApiError> {
    client
        .patch_json(&format!("/api/v1/tasks/{task_id}"), token, update)
        .await
}
