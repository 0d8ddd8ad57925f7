//! Core business logic for the net-worth tracker.
//!
//! This crate contains the domain logic with no web or database
//! dependencies (the only outbound edge is the Plaid HTTP client).
//!
//! # Modules
//!
//! - `auth` - Password hashing
//! - `provider` - Plaid API client for account aggregation
//! - `linking` - Filtering and sign-normalization of linked accounts
//! - `networth` - Net worth aggregation over account balances

pub mod auth;
pub mod linking;
pub mod networth;
pub mod provider;
