use synergy_api::{ApiClient, ApiError, projects};

/// Run a project sub-resource load with the membership recovery policy:
/// on a membership rejection, join the project once and retry the load
/// once. A second failure (or a failed join) is surfaced as-is; the retry
/// is bounded so a persistently failing backend cannot loop the client.
pub async fn with_membership_retry<T, F, Fut>(
    client: &ApiClient,
    token: &str,
    project_id: i64,
    op: F,
) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    match op().await {
        Err(ApiError::MembershipRequired) => {
            tracing::debug!(project_id, "not a member yet, joining and retrying");
            projects::join_project(client, token, project_id).await?;
            op().await
        }
        other => other,
    }
}
