//! Filtering and sign-normalization of provider accounts.
//!
//! This is the reconciliation core: provider payloads are narrowed to the
//! American Express credit accounts this application manages, then shaped
//! into ledger rows that satisfy the sign convention (liabilities stored
//! non-positive).

mod service;

pub use service::{
    AMEX_INSTITUTION_ID, LinkedAccount, is_linkable, liability_balance, normalize,
    select_linkable,
};
