//! Net worth computation.

use rust_decimal::Decimal;

use super::types::{AccountBalance, NetWorthSnapshot};

/// Computes a net worth snapshot over a set of active account balances.
///
/// Under the sign convention (liabilities stored non-positive) net worth
/// is the plain sum of signed balances; the asset and liability totals are
/// the two partitions of that sum. An empty set yields all zeros.
#[must_use]
pub fn compute<I>(accounts: I) -> NetWorthSnapshot
where
    I: IntoIterator<Item = AccountBalance>,
{
    let mut total_assets = Decimal::ZERO;
    let mut total_liabilities = Decimal::ZERO;

    for account in accounts {
        if account.is_asset {
            total_assets += account.balance;
        } else {
            total_liabilities += -account.balance;
        }
    }

    NetWorthSnapshot {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn account_strategy() -> impl Strategy<Value = AccountBalance> {
        // Balances respect the sign convention by construction
        (0i64..100_000_000, any::<bool>()).prop_map(|(cents, is_asset)| {
            let magnitude = Decimal::new(cents, 2);
            AccountBalance {
                balance: if is_asset { magnitude } else { -magnitude },
                is_asset,
            }
        })
    }

    proptest! {
        // Net worth is always the sum of signed balances, and equals the
        // asset total minus the liability total.
        #[test]
        fn prop_net_worth_algebra(accounts in proptest::collection::vec(account_strategy(), 0..50)) {
            let expected_sum: Decimal = accounts.iter().map(|a| a.balance).sum();
            let snapshot = compute(accounts);

            prop_assert_eq!(snapshot.net_worth, expected_sum);
            prop_assert_eq!(
                snapshot.net_worth,
                snapshot.total_assets - snapshot.total_liabilities
            );
            prop_assert!(snapshot.total_assets >= Decimal::ZERO);
            prop_assert!(snapshot.total_liabilities >= Decimal::ZERO);
        }
    }
}
