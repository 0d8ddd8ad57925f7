//! Account management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use networth_core::linking::liability_balance;
use networth_db::entities::{accounts, sea_orm_active_enums::AccountProvider};
use networth_db::repositories::account::{AccountError, AccountFilter, AccountRepository, CreateAccountInput};

/// Creates the account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts/{account_id}/balance", put(update_balance))
        .route("/accounts/{account_id}", delete(delete_account))
}

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Filter by account type tag.
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    /// Restrict to card rows and report positive owed amounts.
    #[serde(default)]
    pub cards: bool,
}

/// Request body for creating a manual card account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account name.
    pub name: String,
    /// Card category: "credit" or "charge".
    pub category: String,
    /// Owed amount; stored as a negative balance regardless of sign.
    pub balance: Decimal,
    /// Available credit, if known.
    pub available_credit: Option<Decimal>,
}

/// Request body for updating an account balance.
#[derive(Debug, Deserialize)]
pub struct UpdateBalanceRequest {
    /// New balance; re-normalized to the row's sign convention.
    pub balance: Decimal,
}

/// Response for an account row.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Account name.
    pub name: String,
    /// Account type tag.
    #[serde(rename = "type")]
    pub account_type: String,
    /// Balance. Signed as stored, except in the card listing where the
    /// positive owed amount is reported.
    pub balance: String,
    /// Whether the account is an asset.
    pub is_asset: bool,
    /// Provenance tag.
    pub provider: String,
    /// Provider account id for linked rows.
    pub external_account_id: Option<String>,
    /// Available credit, for card rows.
    pub available_credit: Option<String>,
    /// Last reconciled marker.
    pub updated_at: String,
}

impl AccountResponse {
    fn from_model(account: accounts::Model, positive_owed: bool) -> Self {
        let balance = if positive_owed && !account.is_asset {
            account.current_balance.abs()
        } else {
            account.current_balance
        };

        Self {
            id: account.id,
            name: account.name,
            account_type: account.account_type,
            balance: balance.to_string(),
            is_asset: account.is_asset,
            provider: account.provider.as_str().to_string(),
            external_account_id: account.external_account_id,
            available_credit: account.available_credit.map(|c| c.to_string()),
            updated_at: account.updated_at.to_rfc3339(),
        }
    }
}

/// GET `/accounts` - List the caller's active accounts.
async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListAccountsQuery>,
) -> impl IntoResponse {
    let account_repo = AccountRepository::new((*state.db).clone());

    let filter = AccountFilter {
        account_type: query.account_type,
        cards_only: query.cards,
    };

    match account_repo.list_accounts(auth.user_id(), filter).await {
        Ok(accounts) => {
            let response: Vec<AccountResponse> = accounts
                .into_iter()
                .map(|a| AccountResponse::from_model(a, query.cards))
                .collect();

            (StatusCode::OK, Json(json!({ "accounts": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list accounts");
            internal_error()
        }
    }
}

/// POST `/accounts` - Create a manual card account.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    // Map the card category onto the stored type tag
    let account_type = match payload.category.as_str() {
        "credit" => "credit_card",
        "charge" => "charge_card",
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_category",
                    "message": "Category must be one of: credit, charge"
                })),
            )
                .into_response();
        }
    };

    let account_repo = AccountRepository::new((*state.db).clone());

    let input = CreateAccountInput {
        user_id: auth.user_id(),
        name: payload.name,
        account_type: account_type.to_string(),
        // Card accounts are liabilities: stored negative
        current_balance: liability_balance(payload.balance),
        is_asset: false,
        provider: AccountProvider::Manual,
        external_account_id: None,
        available_credit: payload.available_credit,
    };

    match account_repo.create_account(input).await {
        Ok(account) => {
            info!(
                user_id = %auth.user_id(),
                account_id = %account.id,
                "Manual account created"
            );

            (
                StatusCode::CREATED,
                Json(json!({
                    "id": account.id,
                    "name": account.name,
                    "type": account.account_type,
                    "balance": account.current_balance.abs().to_string(),
                    "provider": account.provider.as_str(),
                    "available_credit": account.available_credit.map(|c| c.to_string()),
                    "created_at": account.created_at
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create account");
            internal_error()
        }
    }
}

/// PUT `/accounts/{account_id}/balance` - Update an account balance.
async fn update_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<UpdateBalanceRequest>,
) -> impl IntoResponse {
    let account_repo = AccountRepository::new((*state.db).clone());

    if let Err(response) = check_ownership(&account_repo, account_id, auth.user_id()).await {
        return response;
    }

    match account_repo.update_balance(account_id, payload.balance).await {
        Ok(account) => {
            info!(
                user_id = %auth.user_id(),
                account_id = %account_id,
                "Account balance updated"
            );

            (
                StatusCode::OK,
                Json(json!({
                    "id": account.id,
                    "balance": account.current_balance.to_string(),
                    "updated_at": account.updated_at
                })),
            )
                .into_response()
        }
        Err(AccountError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to update balance");
            internal_error()
        }
    }
}

/// DELETE `/accounts/{account_id}` - Delete (deactivate) an account.
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let account_repo = AccountRepository::new((*state.db).clone());

    if let Err(response) = check_ownership(&account_repo, account_id, auth.user_id()).await {
        return response;
    }

    match account_repo.deactivate(account_id).await {
        Ok(()) => {
            info!(
                user_id = %auth.user_id(),
                account_id = %account_id,
                "Account deleted (deactivated)"
            );

            (StatusCode::NO_CONTENT, ()).into_response()
        }
        Err(AccountError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete account");
            internal_error()
        }
    }
}

// Helper functions

/// Verifies the account exists and belongs to the caller.
async fn check_ownership(
    account_repo: &AccountRepository,
    account_id: Uuid,
    user_id: Uuid,
) -> Result<(), axum::response::Response> {
    match account_repo.find_by_id(account_id).await {
        Ok(Some(a)) if a.user_id == user_id => Ok(()),
        Ok(Some(_)) => Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Account does not belong to you"
            })),
        )
            .into_response()),
        Ok(None) => Err(not_found()),
        Err(e) => {
            error!(error = %e, "Failed to find account");
            Err(internal_error())
        }
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Account not found"
        })),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}
