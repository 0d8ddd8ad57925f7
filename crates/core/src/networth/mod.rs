//! Net worth aggregation over account balances.

mod service;
mod types;

pub use service::compute;
pub use types::{AccountBalance, NetWorthSnapshot};
