//! Initial migration: users and the per-user account ledger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS accounts CASCADE;
             DROP TABLE IF EXISTS users CASCADE;
             DROP TYPE IF EXISTS account_provider;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Users table (self-hosted auth)
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Closed provenance tag for account rows
CREATE TYPE account_provider AS ENUM ('plaid', 'direct', 'manual');

-- Per-user account ledger
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    account_type VARCHAR(64) NOT NULL,
    current_balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    is_asset BOOLEAN NOT NULL,
    provider account_provider NOT NULL DEFAULT 'manual',
    external_account_id VARCHAR(255),
    available_credit NUMERIC(19, 4),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- Sign convention: liabilities non-positive, assets non-negative
    CONSTRAINT chk_balance_sign CHECK (
        (is_asset AND current_balance >= 0) OR ((NOT is_asset) AND current_balance <= 0)
    ),
    -- Dedup key against the external provider; NULLs (manual rows) are
    -- distinct, so only linked rows are constrained
    CONSTRAINT uq_accounts_user_external UNIQUE (user_id, external_account_id)
);

-- Index for the per-user listing (most common read)
CREATE INDEX idx_accounts_user_active ON accounts(user_id, created_at DESC) WHERE is_active;
";
