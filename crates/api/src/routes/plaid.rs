//! Plaid account-linking routes.
//!
//! Two endpoints drive the linking flow: link-token creation opens the
//! provider's client-side session, and the exchange endpoint turns the
//! resulting one-time public token into imported ledger rows.

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser};
use networth_core::linking::select_linkable;
use networth_core::provider::PlaidClient;
use networth_db::AccountRepository;

/// Creates the Plaid routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/plaid/link-token", post(create_link_token))
        .route("/plaid/exchange", post(exchange_token))
}

/// Request body for the token exchange.
#[derive(Debug, Deserialize)]
pub struct ExchangeTokenRequest {
    /// One-time public token from the provider's linking UI.
    pub public_token: String,
}

/// POST `/plaid/link-token` - Request a link token for the caller.
///
/// The token is forwarded verbatim to the client; nothing is stored.
async fn create_link_token(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let Some(plaid) = plaid_client(&state) else {
        return plaid_not_configured();
    };

    match plaid.create_link_token(auth.user_id()).await {
        Ok(link_token) => {
            info!(user_id = %auth.user_id(), "Link token created");
            (StatusCode::OK, Json(json!({ "link_token": link_token }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create link token");
            upstream_error(&e.to_string())
        }
    }
}

/// POST `/plaid/exchange` - Exchange a public token and import accounts.
///
/// Persistence happens only after both provider calls succeed, so an
/// upstream failure aborts the whole operation with nothing written.
async fn exchange_token(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ExchangeTokenRequest>,
) -> impl IntoResponse {
    if payload.public_token.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "missing_public_token",
                "message": "A public_token is required"
            })),
        )
            .into_response();
    }

    let Some(plaid) = plaid_client(&state) else {
        return plaid_not_configured();
    };

    // Exchange the one-time public token for an access token
    let access_token = match plaid.exchange_public_token(&payload.public_token).await {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to exchange public token");
            return upstream_error(&e.to_string());
        }
    };

    // Fetch the full account list for that access token
    let provider_accounts = match plaid.accounts(&access_token).await {
        Ok(a) => a,
        Err(e) => {
            error!(error = %e, "Failed to fetch provider accounts");
            return upstream_error(&e.to_string());
        }
    };

    // Narrow to Amex credit accounts and normalize to ledger rows
    let linked = select_linkable(&provider_accounts);

    let account_repo = AccountRepository::new((*state.db).clone());
    let imported = match account_repo.upsert_linked(auth.user_id(), &linked).await {
        Ok(count) => count,
        Err(e) => {
            error!(error = %e, "Failed to store linked accounts");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "storage_error",
                    "message": "Failed to store linked accounts"
                })),
            )
                .into_response();
        }
    };

    info!(
        user_id = %auth.user_id(),
        imported,
        fetched = provider_accounts.len(),
        "Linked accounts imported"
    );

    (
        StatusCode::OK,
        Json(json!({
            "accounts": imported,
            "message": format!("Successfully connected {imported} American Express accounts")
        })),
    )
        .into_response()
}

// Helper functions

fn plaid_client(state: &AppState) -> Option<Arc<PlaidClient>> {
    state.plaid.clone()
}

fn plaid_not_configured() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "plaid_not_configured",
            "message": "Plaid configuration missing"
        })),
    )
        .into_response()
}

fn upstream_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "upstream_error",
            "message": message
        })),
    )
        .into_response()
}
