use reqwest::StatusCode;
use synergy_api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the credentials or the signup email is already
    /// taken. The message is the backend's response body, presented to the
    /// user as-is.
    #[error("{0}")]
    Rejected(String),

    /// Any other failure (transport, server error) while authenticating.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    pub(crate) fn classify(err: ApiError) -> Self {
        match err {
            ApiError::Http { status, body }
                if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED =>
            {
                Self::Rejected(body)
            }
            other => Self::Api(other),
        }
    }
}
