use reqwest::StatusCode;
use serde::Deserialize;

/// Errors returned by the [`GatewayClient`](crate::GatewayClient).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The service answered with a non-success status.
    #[error("request rejected with {status}: {message}")]
    ServiceRejected { status: StatusCode, message: String },
    /// The request never completed: timeout, DNS or connection failure.
    #[error("failed to reach the marketplace API")]
    TransportFailure(#[source] reqwest::Error),
    /// The service answered with a body that doesn't match the expected record.
    #[error("unexpected response from `{path}`")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid API URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Error body returned by the service.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl GatewayError {
    /// Builds a [`GatewayError::ServiceRejected`] from a failed response.
    ///
    /// The message is the body's `message` field, then its `error` field, then the raw body, then
    /// the canonical reason of `status`.
    pub(crate) fn rejected(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorResponse>(body).unwrap_or_default();
        let message = [parsed.message, parsed.error]
            .into_iter()
            .flatten()
            .find(|message| !message.trim().is_empty())
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_string());
        Self::ServiceRejected { status, message }
    }

    pub(crate) fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl { url: url.into(), reason: reason.to_string() }
    }

    /// The status code of a rejected request.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ServiceRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the request failed because it ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TransportFailure(err) if err.is_timeout())
    }

    /// Whether the request failed before the service could answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(status: StatusCode, body: &str) -> String {
        match GatewayError::rejected(status, body) {
            GatewayError::ServiceRejected { message, .. } => message,
            err => panic!("unexpected error: {err:?}"),
        }
    }

    #[test]
    fn rejection_message_fallbacks() {
        let body = r#"{"error":"order_not_found","message":"order does not exist","code":404}"#;
        assert_eq!(message(StatusCode::NOT_FOUND, body), "order does not exist");

        let body = r#"{"error":"invalid_id","message":""}"#;
        assert_eq!(message(StatusCode::BAD_REQUEST, body), "invalid_id");

        assert_eq!(message(StatusCode::BAD_GATEWAY, "upstream down\n"), "upstream down");
        assert_eq!(message(StatusCode::SERVICE_UNAVAILABLE, ""), "Service Unavailable");
    }

    #[test]
    fn rejection_display() {
        let err = GatewayError::rejected(StatusCode::UNAUTHORIZED, r#"{"message":"missing user"}"#);
        assert_eq!(err.to_string(), "request rejected with 401 Unauthorized: missing user");
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(!err.is_transport());
    }
}
