//! Net worth data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time net worth, derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetWorthSnapshot {
    /// Sum of asset balances (non-negative).
    pub total_assets: Decimal,
    /// Sum of liability magnitudes (non-negative).
    pub total_liabilities: Decimal,
    /// `total_assets - total_liabilities`.
    pub net_worth: Decimal,
}

impl NetWorthSnapshot {
    /// A snapshot with no accounts: all zeros.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            total_assets: Decimal::ZERO,
            total_liabilities: Decimal::ZERO,
            net_worth: Decimal::ZERO,
        }
    }
}

/// The slice of an account row that net worth depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountBalance {
    /// Signed balance under the sign convention (liabilities non-positive).
    pub balance: Decimal,
    /// Whether the account is an asset.
    pub is_asset: bool,
}
