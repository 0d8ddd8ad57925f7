//! Plaid API client for account aggregation.
//!
//! Three calls are used: link-token creation, public-token exchange, and
//! account listing. Link-token creation and account listing are idempotent
//! and retried on transient failures; the exchange call consumes a
//! single-use token and is never retried.

mod client;
mod config;
mod error;
mod types;

pub use client::PlaidClient;
pub use config::{PlaidConfig, PlaidEnvironment};
pub use error::ProviderError;
pub use types::{ProviderAccount, ProviderBalances};
