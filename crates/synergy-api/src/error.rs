use reqwest::StatusCode;

/// Errors surfaced by every fetcher in this crate.
///
/// The backend has no structured error taxonomy; a failed response carries
/// its raw body text and callers present that message directly. The one
/// response the client does discriminate is the membership rejection on
/// project sub-resources, which gets its own variant so the join-and-retry
/// policy can dispatch on a stable tag instead of matching strings at every
/// call site.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request itself failed: connection refused, DNS, TLS, timeout.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response. `body` is the raw response text, or the status
    /// line when the body was empty or unreadable.
    #[error("{body}")]
    Http { status: StatusCode, body: String },

    /// 403 from a project sub-resource for a user who has not joined the
    /// project. Eligible for a single join-then-retry.
    #[error("not a member of this project")]
    MembershipRequired,
}

impl ApiError {
    /// Classify a non-2xx response. The backend signals a membership
    /// rejection as 403 with detail "Not a member of this project"; the
    /// match is a case-insensitive substring so wording drift in the
    /// surrounding JSON does not break the retry policy.
    pub(crate) fn from_response(status: StatusCode, body: String) -> Self {
        if status == StatusCode::FORBIDDEN && body.to_ascii_lowercase().contains("not a member") {
            return Self::MembershipRequired;
        }
        let body = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        };
        Self::Http { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_membership_body_is_tagged() {
        let err = ApiError::from_response(
            StatusCode::FORBIDDEN,
            r#"{"detail":"Not a member of this project"}"#.to_string(),
        );
        assert!(matches!(err, ApiError::MembershipRequired));
    }

    #[test]
    fn other_forbidden_bodies_stay_plain_http_errors() {
        let err = ApiError::from_response(StatusCode::FORBIDDEN, "nope".to_string());
        assert!(matches!(err, ApiError::Http { .. }));
    }

    #[test]
    fn empty_body_falls_back_to_status_line() {
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, String::new());
        match err {
            ApiError::Http { body, .. } => assert_eq!(body, "HTTP 500 Internal Server Error"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
