//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Provenance of an account row. Closed set: a new provider requires an
/// explicit code change, it cannot typo in through an open string.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_provider")]
pub enum AccountProvider {
    /// Imported through the Plaid aggregation provider.
    #[sea_orm(string_value = "plaid")]
    Plaid,
    /// Connected through a direct issuer API.
    #[sea_orm(string_value = "direct")]
    Direct,
    /// Entered by hand.
    #[sea_orm(string_value = "manual")]
    Manual,
}

impl AccountProvider {
    /// Display tag, matching the stored string value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plaid => "plaid",
            Self::Direct => "direct",
            Self::Manual => "manual",
        }
    }
}
