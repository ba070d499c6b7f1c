use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by a completion provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Credential missing, malformed or rejected by the provider.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The provider understood the request but declined it.
    #[error("request rejected ({status}): {body}")]
    RequestRejected { status: u16, body: String },

    /// Transport-level failure before any response was read.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Success status without usable content.
    #[error("provider returned no content")]
    Empty,

    /// Any other non-success status.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode provider response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProviderError {
    /// Map a non-success HTTP status and its body to an error.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::Unauthorized(format!("{}: {}", status, body))
            }
            StatusCode::BAD_REQUEST
            | StatusCode::NOT_FOUND
            | StatusCode::PAYLOAD_TOO_LARGE
            | StatusCode::UNPROCESSABLE_ENTITY => ProviderError::RequestRejected {
                status: status.as_u16(),
                body,
            },
            _ => ProviderError::Status {
                status: status.as_u16(),
                body,
            },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ProviderError::Other(anyhow::Error::new(err));
        }
        match err.status() {
            Some(status) => ProviderError::from_status(status, err.to_string()),
            None => ProviderError::Network(err),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err)
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_map_to_unauthorized() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = ProviderError::from_status(status, "Invalid API Key".to_string());
            assert!(matches!(err, ProviderError::Unauthorized(msg) if msg.contains("Invalid API Key")));
        }
    }

    #[test]
    fn test_client_errors_map_to_rejected() {
        let err = ProviderError::from_status(StatusCode::BAD_REQUEST, "unsupported".to_string());
        assert!(matches!(
            err,
            ProviderError::RequestRejected { status: 400, ref body } if body == "unsupported"
        ));
    }

    #[test]
    fn test_server_errors_keep_status() {
        let err = ProviderError::from_status(StatusCode::SERVICE_UNAVAILABLE, "down".to_string());
        assert!(matches!(err, ProviderError::Status { status: 503, .. }));
        assert_eq!(err.to_string(), "request failed with status 503: down");
    }
}
