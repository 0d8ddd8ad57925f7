//! Plaid HTTP client.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use uuid::Uuid;

use super::config::PlaidConfig;
use super::error::ProviderError;
use super::types::{
    AccountFilters, AccountsGetRequest, AccountsGetResponse, CreditFilter, ExchangeTokenRequest,
    ExchangeTokenResponse, LinkTokenCreateRequest, LinkTokenCreateResponse, LinkTokenUser,
    ProviderAccount, ProviderErrorBody,
};
use crate::linking::AMEX_INSTITUTION_ID;

/// Name shown to the end user inside the provider's linking UI.
const CLIENT_NAME: &str = "Net Worth Tracker";

/// Base delay before the first retry.
const BASE_BACKOFF_MS: u64 = 200;

/// Maximum random jitter added to each backoff delay.
const JITTER_MS: u64 = 100;

/// Client for the Plaid account-aggregation API.
#[derive(Debug, Clone)]
pub struct PlaidClient {
    http: reqwest::Client,
    config: PlaidConfig,
    base_url: String,
}

impl PlaidClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: PlaidConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = config.effective_base_url();

        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    /// Requests a link token scoped to one user, credit-card products, and
    /// the American Express institution. Idempotent; retried on transient
    /// failures.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the provider call fails after retries.
    pub async fn create_link_token(&self, user_id: Uuid) -> Result<String, ProviderError> {
        let request = LinkTokenCreateRequest {
            client_id: self.config.client_id.clone(),
            secret: self.config.secret.clone(),
            client_name: CLIENT_NAME.to_string(),
            country_codes: vec!["US".to_string()],
            language: "en".to_string(),
            user: LinkTokenUser {
                client_user_id: user_id.to_string(),
            },
            products: vec!["transactions".to_string(), "accounts".to_string()],
            account_filters: AccountFilters {
                credit: CreditFilter {
                    account_subtypes: vec!["credit card".to_string()],
                },
            },
            institution_ids: vec![AMEX_INSTITUTION_ID.to_string()],
        };

        let response: LinkTokenCreateResponse = self
            .post_with_retry("/link/token/create", &request)
            .await?;
        Ok(response.link_token)
    }

    /// Exchanges a one-time public token for a durable access token.
    /// The public token is single-use, so this call is never retried.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the exchange fails.
    pub async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<String, ProviderError> {
        let request = ExchangeTokenRequest {
            client_id: self.config.client_id.clone(),
            secret: self.config.secret.clone(),
            public_token: public_token.to_string(),
        };

        let response: ExchangeTokenResponse =
            self.post("/item/public_token/exchange", &request).await?;
        Ok(response.access_token)
    }

    /// Fetches the full account list for an access token. Idempotent;
    /// retried on transient failures.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the provider call fails after retries.
    pub async fn accounts(&self, access_token: &str) -> Result<Vec<ProviderAccount>, ProviderError> {
        let request = AccountsGetRequest {
            client_id: self.config.client_id.clone(),
            secret: self.config.secret.clone(),
            access_token: access_token.to_string(),
        };

        let response: AccountsGetResponse = self.post_with_retry("/accounts/get", &request).await?;
        Ok(response.accounts)
    }

    /// Issues a POST with the bounded retry policy for idempotent calls.
    async fn post_with_retry<B, T>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let mut attempt: u32 = 0;
        loop {
            match self.post(path, body).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.config.max_retries && e.is_retryable() => {
                    attempt += 1;
                    let backoff_ms = BASE_BACKOFF_MS << (attempt - 1);
                    let jitter_ms = rand::rng().random_range(0..JITTER_MS);
                    warn!(
                        path,
                        attempt,
                        backoff_ms = backoff_ms + jitter_ms,
                        error = %e,
                        "Retrying provider call"
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms + jitter_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Issues a single POST and maps non-success statuses to `Api` errors
    /// carrying the provider's `error_message`.
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_body: ProviderErrorBody = response.json().await.unwrap_or_default();
            let message = error_body
                .error_message
                .unwrap_or_else(|| format!("provider returned status {status}"));
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::config::PlaidEnvironment;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> PlaidClient {
        let config = PlaidConfig::new(
            "test-client-id".into(),
            "test-secret".into(),
            PlaidEnvironment::Sandbox,
        )
        .with_base_url(base_url)
        .with_max_retries(1);

        PlaidClient::new(config).expect("client should build")
    }

    #[tokio::test]
    async fn test_create_link_token_sends_credentials_and_scope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/link/token/create"))
            .and(body_partial_json(serde_json::json!({
                "client_id": "test-client-id",
                "secret": "test-secret",
                "institution_ids": ["ins_3"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "link_token": "link-sandbox-abc123"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let token = client.create_link_token(Uuid::new_v4()).await.unwrap();
        assert_eq!(token, "link-sandbox-abc123");
    }

    #[tokio::test]
    async fn test_exchange_failure_surfaces_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/item/public_token/exchange"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error_code": "INVALID_PUBLIC_TOKEN",
                "error_message": "the provided public token is expired"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .exchange_public_token("public-sandbox-expired")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "the provided public token is expired");
        assert!(matches!(err, ProviderError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_exchange_is_never_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/item/public_token/exchange"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error_message": "INTERNAL_SERVER_ERROR"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.exchange_public_token("public-sandbox-x").await;
        assert!(result.is_err());
        // wiremock verifies the expect(1) call count on drop
    }

    #[tokio::test]
    async fn test_accounts_retries_transient_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts/get"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error_message": "INTERNAL_SERVER_ERROR"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/accounts/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accounts": [{
                    "account_id": "acc-1",
                    "name": "Amex Card",
                    "type": "credit",
                    "institution_id": "ins_3",
                    "balances": { "current": 250 }
                }]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let accounts = client.accounts("access-sandbox-token").await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].account_id, "acc-1");
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts/get"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error_message": "INVALID_ACCESS_TOKEN"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.accounts("bad-token").await.unwrap_err();
        assert_eq!(err.to_string(), "INVALID_ACCESS_TOKEN");
    }
}
