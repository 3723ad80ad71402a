use synergy_types::api::{LoginResponse, SignupRequest, UserResponse};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Exchange credentials for a bearer token. The endpoint is OAuth2
/// password-grant shaped: the email travels in the `username` form field.
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    client
        .post_form(
            "/api/v1/auth/login",
            &[("username", email), ("password", password)],
        )
        .await
}

/// Create an account. Does not log in; callers that want a session follow
/// up with [`login`].
pub async fn signup(
    client: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<UserResponse, ApiError> {
    let body = SignupRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    client.post_json("/api/v1/auth/signup", None, &body).await
}

/// Validate a token and fetch the user it belongs to.
pub async fn me(client: &ApiClient, token: &str) -> Result<UserResponse, ApiError> {
    client.get_json("/api/v1/auth/me", token).await
}
