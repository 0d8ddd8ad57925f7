//! Account repository for the per-user ledger.

use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use networth_core::linking::{LinkedAccount, liability_balance};
use networth_core::networth::{AccountBalance, NetWorthSnapshot, compute};

use crate::entities::{accounts, sea_orm_active_enums::AccountProvider};

/// Account types treated as cards by the card-service listing.
const CARD_TYPES: [&str; 2] = ["credit_card", "charge_card"];

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Display label.
    pub name: String,
    /// Categorical tag (credit_card, charge_card, checking, ...).
    pub account_type: String,
    /// Signed balance; the caller is responsible for the sign convention.
    pub current_balance: Decimal,
    /// Whether the account is an asset.
    pub is_asset: bool,
    /// Provenance tag.
    pub provider: AccountProvider,
    /// Provider account id, for linked rows.
    pub external_account_id: Option<String>,
    /// Available credit, for card accounts.
    pub available_credit: Option<Decimal>,
}

/// Filter options for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Filter by categorical tag.
    pub account_type: Option<String>,
    /// Restrict to card rows (credit_card / charge_card).
    pub cards_only: bool,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            name: Set(input.name),
            account_type: Set(input.account_type),
            current_balance: Set(input.current_balance),
            is_asset: Set(input.is_asset),
            provider: Set(input.provider),
            external_account_id: Set(input.external_account_id),
            available_credit: Set(input.available_credit),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = account.insert(&self.db).await?;
        Ok(account)
    }

    /// Lists a user's active accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        user_id: Uuid,
        filter: AccountFilter,
    ) -> Result<Vec<accounts::Model>, AccountError> {
        let mut query = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .filter(accounts::Column::IsActive.eq(true))
            .order_by_desc(accounts::Column::CreatedAt);

        if let Some(account_type) = filter.account_type {
            query = query.filter(accounts::Column::AccountType.eq(account_type));
        }

        if filter.cards_only {
            query = query.filter(accounts::Column::AccountType.is_in(CARD_TYPES));
        }

        let accounts = query.all(&self.db).await?;
        Ok(accounts)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<accounts::Model>, AccountError> {
        let account = accounts::Entity::find_by_id(id).one(&self.db).await?;
        Ok(account)
    }

    /// Updates an account's balance, re-applying the sign convention by the
    /// row's asset flag, and touches `updated_at` (the "last reconciled"
    /// marker).
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist or the update fails.
    pub async fn update_balance(
        &self,
        id: Uuid,
        balance: Decimal,
    ) -> Result<accounts::Model, AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let normalized = if account.is_asset {
            balance.abs()
        } else {
            liability_balance(balance)
        };

        let mut active: accounts::ActiveModel = account.into();
        active.current_balance = Set(normalized);
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deactivates an account (logical delete; the row is kept).
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist or the update fails.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let mut active: accounts::ActiveModel = account.into();
        active.is_active = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }

    /// Bulk-upserts linked card accounts for a user, keyed on
    /// `(user_id, external_account_id)`. Re-imports refresh the name and
    /// balance and re-activate the row instead of duplicating it. An empty
    /// set skips the write entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert_linked(
        &self,
        user_id: Uuid,
        linked: &[LinkedAccount],
    ) -> Result<u64, AccountError> {
        if linked.is_empty() {
            return Ok(0);
        }

        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let rows = linked.iter().map(|account| accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(account.name.clone()),
            account_type: Set("credit_card".to_string()),
            current_balance: Set(account.current_balance),
            is_asset: Set(false),
            provider: Set(AccountProvider::Plaid),
            external_account_id: Set(Some(account.external_account_id.clone())),
            available_credit: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        });

        let affected = accounts::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([
                    accounts::Column::UserId,
                    accounts::Column::ExternalAccountId,
                ])
                .update_columns([
                    accounts::Column::Name,
                    accounts::Column::CurrentBalance,
                    accounts::Column::IsActive,
                    accounts::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(affected)
    }

    /// Computes the user's net worth over active accounts. Zero accounts
    /// yields an all-zero snapshot, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn net_worth(&self, user_id: Uuid) -> Result<NetWorthSnapshot, AccountError> {
        let rows = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .filter(accounts::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;

        let snapshot = compute(rows.iter().map(|row| AccountBalance {
            balance: row.current_balance,
            is_asset: row.is_asset,
        }));

        Ok(snapshot)
    }
}
