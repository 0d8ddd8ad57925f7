//! Plaid client configuration.

/// Plaid environment selector. Each environment targets a different base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaidEnvironment {
    /// Sandbox environment with synthetic institutions.
    Sandbox,
    /// Development environment (limited live data).
    Development,
    /// Production environment.
    Production,
}

impl PlaidEnvironment {
    /// Parses an environment name, defaulting to sandbox for anything
    /// unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "production" => Self::Production,
            "development" => Self::Development,
            _ => Self::Sandbox,
        }
    }

    /// Returns the API base URL for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.plaid.com",
            Self::Development => "https://development.plaid.com",
            Self::Production => "https://production.plaid.com",
        }
    }
}

/// Plaid client configuration.
#[derive(Debug, Clone)]
pub struct PlaidConfig {
    /// Plaid client id.
    pub client_id: String,
    /// Plaid secret.
    pub secret: String,
    /// Target environment.
    pub environment: PlaidEnvironment,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry budget for idempotent calls.
    pub max_retries: u32,
    /// Base URL override. When `None`, the environment's URL is used.
    pub base_url: Option<String>,
}

impl PlaidConfig {
    /// Creates a configuration for the given credentials and environment.
    #[must_use]
    pub const fn new(client_id: String, secret: String, environment: PlaidEnvironment) -> Self {
        Self {
            client_id,
            secret,
            environment,
            timeout_secs: 10,
            max_retries: 2,
            base_url: None,
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the retry budget for idempotent calls.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Overrides the API base URL (used by tests against a local stub).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Returns the effective API base URL.
    #[must_use]
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.environment.base_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_name() {
        assert_eq!(
            PlaidEnvironment::from_name("production"),
            PlaidEnvironment::Production
        );
        assert_eq!(
            PlaidEnvironment::from_name("development"),
            PlaidEnvironment::Development
        );
        assert_eq!(
            PlaidEnvironment::from_name("sandbox"),
            PlaidEnvironment::Sandbox
        );
        // Anything unrecognized falls back to sandbox
        assert_eq!(
            PlaidEnvironment::from_name("staging"),
            PlaidEnvironment::Sandbox
        );
    }

    #[test]
    fn test_base_urls() {
        assert_eq!(
            PlaidEnvironment::Sandbox.base_url(),
            "https://sandbox.plaid.com"
        );
        assert_eq!(
            PlaidEnvironment::Development.base_url(),
            "https://development.plaid.com"
        );
        assert_eq!(
            PlaidEnvironment::Production.base_url(),
            "https://production.plaid.com"
        );
    }

    #[test]
    fn test_base_url_override_wins() {
        let config = PlaidConfig::new(
            "client".into(),
            "secret".into(),
            PlaidEnvironment::Sandbox,
        )
        .with_base_url("http://127.0.0.1:4010");

        assert_eq!(config.effective_base_url(), "http://127.0.0.1:4010");
    }
}
