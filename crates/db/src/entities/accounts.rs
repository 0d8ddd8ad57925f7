//! `SeaORM` Entity for accounts table (the per-user ledger).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AccountProvider;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Open categorical tag: credit_card, charge_card, checking, ...
    pub account_type: String,
    /// Signed balance. Liabilities are stored non-positive, assets
    /// non-negative; a CHECK constraint backs this up.
    pub current_balance: Decimal,
    pub is_asset: bool,
    pub provider: AccountProvider,
    /// Provider account id for linked rows; dedup key per user.
    pub external_account_id: Option<String>,
    pub available_credit: Option<Decimal>,
    /// Soft-delete flag; rows are never physically removed.
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
