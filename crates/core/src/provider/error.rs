//! Plaid client error types.

use thiserror::Error;

/// Errors returned by the Plaid client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a usable response (connect failure,
    /// timeout, or an unparseable body).
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status. The message is the
    /// provider's own `error_message` and is surfaced to the caller.
    #[error("{message}")]
    Api {
        /// HTTP status returned by the provider.
        status: u16,
        /// Provider-supplied error message.
        message: String,
    },
}

impl ProviderError {
    /// Whether a retry could plausibly succeed. Client errors (4xx other
    /// than 429) are permanent; transport failures and server errors are
    /// worth one more attempt.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_retryability() {
        let bad_request = ProviderError::Api {
            status: 400,
            message: "INVALID_PUBLIC_TOKEN".into(),
        };
        assert!(!bad_request.is_retryable());

        let rate_limited = ProviderError::Api {
            status: 429,
            message: "RATE_LIMIT_EXCEEDED".into(),
        };
        assert!(rate_limited.is_retryable());

        let server_error = ProviderError::Api {
            status: 500,
            message: "INTERNAL_SERVER_ERROR".into(),
        };
        assert!(server_error.is_retryable());
    }

    #[test]
    fn test_api_error_displays_provider_message() {
        let err = ProviderError::Api {
            status: 400,
            message: "the provided public token is expired".into(),
        };
        assert_eq!(err.to_string(), "the provided public token is expired");
    }
}
