use reqwest::header::CACHE_CONTROL;
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Shared HTTP client for the SynergySphere backend.
///
/// One instance is built at startup and cloned freely; `reqwest::Client` is
/// an `Arc` around its connection pool. All request plumbing lives here so
/// the per-resource modules stay thin wrappers over one path + one shape.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        // The base URL was validated by ApiConfig; store it without the
        // trailing slash so `base + "/api/v1/..."` concatenates cleanly.
        let base_url = config.base_url.to_string();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(t) => builder.header("Authorization", format!("Bearer {t}")),
            None => builder,
        }
    }

    /// GET a JSON list or object. Every read is a fresh network read; the
    /// no-cache header keeps intermediaries from replaying stale lists
    /// after a mutation elsewhere in the client.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ApiError> {
        let req = self
            .http
            .get(self.url(path))
            .header(CACHE_CONTROL, "no-cache");
        let resp = Self::bearer(req, Some(token)).send().await?;
        Self::read_json(resp).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.post(self.url(path)).json(body);
        let resp = Self::bearer(req, token).send().await?;
        Self::read_json(resp).await
    }

    /// POST with no body where only the status matters (e.g. joining a
    /// project, which answers 204).
    pub async fn post_empty(&self, path: &str, token: &str) -> Result<(), ApiError> {
        let req = self.http.post(self.url(path));
        let resp = Self::bearer(req, Some(token)).send().await?;
        Self::check(resp).await.map(|_| ())
    }

    /// POST a form-encoded body (the login endpoint is credentials-grant
    /// style and takes `application/x-www-form-urlencoded`).
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let resp = self.http.post(self.url(path)).form(form).send().await?;
        Self::read_json(resp).await
    }

    pub async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.patch(self.url(path)).json(body);
        let resp = Self::bearer(req, Some(token)).send().await?;
        Self::read_json(resp).await
    }

    /// Reject non-2xx responses, carrying the raw body text as the error
    /// message. This is the sole error channel for the whole client.
    async fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(%status, "request rejected by backend");
        Err(ApiError::from_response(status, body))
    }

    async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }
}
