//! Selection and normalization rules for linked accounts.

use rust_decimal::Decimal;

use crate::provider::ProviderAccount;

/// Plaid's institution id for American Express.
pub const AMEX_INSTITUTION_ID: &str = "ins_3";

/// Provider account category this application imports.
const CREDIT_TYPE: &str = "credit";

/// A provider account normalized into ledger-row shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedAccount {
    /// Display name, carried over from the provider.
    pub name: String,
    /// Signed balance. Always non-positive: linked accounts are credit
    /// cards, i.e. liabilities.
    pub current_balance: Decimal,
    /// Provider account id, the dedup key against the external system.
    pub external_account_id: String,
}

/// Normalizes an amount to the stored liability convention: the negative
/// of its absolute value. Shared by the importer and manual card entry.
#[must_use]
pub fn liability_balance(amount: Decimal) -> Decimal {
    -amount.abs()
}

/// Whether a provider account is in scope: American Express AND credit
/// category. Everything else the provider returns is dropped.
#[must_use]
pub fn is_linkable(account: &ProviderAccount) -> bool {
    account.institution_id.as_deref() == Some(AMEX_INSTITUTION_ID)
        && account.account_type == CREDIT_TYPE
}

/// Maps one in-scope provider account to a ledger row. A missing current
/// balance defaults to zero.
#[must_use]
pub fn normalize(account: &ProviderAccount) -> LinkedAccount {
    let reported = account.balances.current.unwrap_or(Decimal::ZERO);
    LinkedAccount {
        name: account.name.clone(),
        current_balance: liability_balance(reported),
        external_account_id: account.account_id.clone(),
    }
}

/// Filters a provider payload down to in-scope accounts and normalizes
/// each survivor.
#[must_use]
pub fn select_linkable(accounts: &[ProviderAccount]) -> Vec<LinkedAccount> {
    accounts.iter().filter(|a| is_linkable(a)).map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderBalances;
    use rust_decimal_macros::dec;

    fn provider_account(
        id: &str,
        account_type: &str,
        institution_id: Option<&str>,
        current: Option<Decimal>,
    ) -> ProviderAccount {
        ProviderAccount {
            account_id: id.to_string(),
            name: format!("Account {id}"),
            account_type: account_type.to_string(),
            subtype: None,
            institution_id: institution_id.map(String::from),
            balances: ProviderBalances {
                available: None,
                current,
                limit: None,
            },
        }
    }

    #[test]
    fn test_amex_credit_accounts_are_linkable() {
        let account = provider_account("a1", "credit", Some("ins_3"), Some(dec!(200)));
        assert!(is_linkable(&account));
    }

    #[test]
    fn test_other_institutions_are_dropped() {
        let chase = provider_account("a1", "credit", Some("ins_5"), Some(dec!(200)));
        assert!(!is_linkable(&chase));

        let unknown = provider_account("a2", "credit", None, Some(dec!(200)));
        assert!(!is_linkable(&unknown));
    }

    #[test]
    fn test_non_credit_accounts_are_dropped() {
        let checking = provider_account("a1", "depository", Some("ins_3"), Some(dec!(5000)));
        assert!(!is_linkable(&checking));
    }

    #[test]
    fn test_normalize_flips_sign() {
        let account = provider_account("a1", "credit", Some("ins_3"), Some(dec!(450)));
        let linked = normalize(&account);
        assert_eq!(linked.current_balance, dec!(-450));
        assert_eq!(linked.external_account_id, "a1");
    }

    #[test]
    fn test_normalize_already_negative_balance() {
        // Some providers report card balances negative already; the stored
        // value must still be the negative absolute amount.
        let account = provider_account("a1", "credit", Some("ins_3"), Some(dec!(-300)));
        assert_eq!(normalize(&account).current_balance, dec!(-300));
    }

    #[test]
    fn test_normalize_missing_balance_defaults_to_zero() {
        let account = provider_account("a1", "credit", Some("ins_3"), None);
        assert_eq!(normalize(&account).current_balance, Decimal::ZERO);
    }

    #[test]
    fn test_select_linkable_filters_and_normalizes() {
        let accounts = vec![
            provider_account("amex-1", "credit", Some("ins_3"), Some(dec!(200))),
            provider_account("amex-2", "credit", Some("ins_3"), Some(dec!(450))),
            provider_account("chk-1", "depository", Some("ins_3"), Some(dec!(9000))),
            provider_account("other-1", "credit", Some("ins_127989"), Some(dec!(75))),
        ];

        let linked = select_linkable(&accounts);
        assert_eq!(linked.len(), 2);
        assert_eq!(linked[0].external_account_id, "amex-1");
        assert_eq!(linked[0].current_balance, dec!(-200));
        assert_eq!(linked[1].external_account_id, "amex-2");
        assert_eq!(linked[1].current_balance, dec!(-450));
    }
}
