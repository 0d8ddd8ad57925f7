//! Request and response bodies for the Plaid API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for `/link/token/create`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LinkTokenCreateRequest {
    pub client_id: String,
    pub secret: String,
    pub client_name: String,
    pub country_codes: Vec<String>,
    pub language: String,
    pub user: LinkTokenUser,
    pub products: Vec<String>,
    pub account_filters: AccountFilters,
    pub institution_ids: Vec<String>,
}

/// End-user reference inside a link-token request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LinkTokenUser {
    pub client_user_id: String,
}

/// Account-type filters applied to the linking session.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AccountFilters {
    pub credit: CreditFilter,
}

/// Credit-account subtype filter.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreditFilter {
    pub account_subtypes: Vec<String>,
}

/// Response body for `/link/token/create`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LinkTokenCreateResponse {
    pub link_token: String,
}

/// Request body for `/item/public_token/exchange`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExchangeTokenRequest {
    pub client_id: String,
    pub secret: String,
    pub public_token: String,
}

/// Response body for `/item/public_token/exchange`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExchangeTokenResponse {
    pub access_token: String,
}

/// Request body for `/accounts/get`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AccountsGetRequest {
    pub client_id: String,
    pub secret: String,
    pub access_token: String,
}

/// Response body for `/accounts/get`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccountsGetResponse {
    pub accounts: Vec<ProviderAccount>,
}

/// Error body the provider returns on non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ProviderErrorBody {
    #[serde(default)]
    pub error_message: Option<String>,
}

/// An account as reported by the aggregation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderAccount {
    /// Provider-assigned opaque account id.
    pub account_id: String,
    /// Display name.
    pub name: String,
    /// Account category (e.g. "credit", "depository").
    #[serde(rename = "type")]
    pub account_type: String,
    /// Account subtype (e.g. "credit card").
    #[serde(default)]
    pub subtype: Option<String>,
    /// Institution the account belongs to.
    #[serde(default)]
    pub institution_id: Option<String>,
    /// Reported balances.
    #[serde(default)]
    pub balances: ProviderBalances,
}

/// Balance block reported per account. Any field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderBalances {
    /// Available balance.
    #[serde(default)]
    pub available: Option<Decimal>,
    /// Current balance.
    #[serde(default)]
    pub current: Option<Decimal>,
    /// Credit limit.
    #[serde(default)]
    pub limit: Option<Decimal>,
}
