//! Net worth route.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::AuthUser};
use networth_db::AccountRepository;

/// Creates the net worth routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/net-worth", get(get_net_worth))
}

/// Response for the net worth snapshot.
#[derive(Debug, Serialize)]
pub struct NetWorthResponse {
    /// Sum of asset balances.
    pub total_assets: String,
    /// Sum of liability magnitudes.
    pub total_liabilities: String,
    /// Assets minus liabilities.
    pub net_worth: String,
}

/// GET `/net-worth` - Net worth over the caller's active accounts.
///
/// Recomputed on every call; an empty ledger yields all zeros.
async fn get_net_worth(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let account_repo = AccountRepository::new((*state.db).clone());

    match account_repo.net_worth(auth.user_id()).await {
        Ok(snapshot) => {
            let response = NetWorthResponse {
                total_assets: snapshot.total_assets.to_string(),
                total_liabilities: snapshot.total_liabilities.to_string(),
                net_worth: snapshot.net_worth.to_string(),
            };

            (StatusCode::OK, Json(json!(response))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to compute net worth");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}
