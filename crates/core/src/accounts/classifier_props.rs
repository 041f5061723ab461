//! Property-based tests for account classification.
//!
//! - Classification is total and deterministic
//! - A code-prefix match takes precedence over any name keyword

use proptest::prelude::*;

use super::classifier::AccountClassifier;
use super::types::{Account, AccountCategory, AccountType};

fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Liability),
        Just(AccountType::Income),
        Just(AccountType::Expense),
        Just(AccountType::Equity),
    ]
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z ]{0,24}",
        Just("Cash in hand".to_string()),
        Just("Bank Alfalah".to_string()),
        Just("Trade receivable".to_string()),
        Just("Vendor payable".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any (code, name, type) triple classifies, and always the same way.
    #[test]
    fn prop_classification_total_and_deterministic(
        code in "[0-9]{1,6}(-[0-9]{2})?",
        name in name_strategy(),
        account_type in account_type_strategy(),
    ) {
        let classifier = AccountClassifier::default();
        let account = Account::leaf(&code, &name, account_type);

        let first = classifier.classify(&account);
        let second = classifier.classify(&account);

        prop_assert_eq!(first, second);
        prop_assert_eq!(first.class, account_type);
    }

    /// An account under a bank prefix is a bank account whatever its name says.
    #[test]
    fn prop_code_prefix_beats_name(
        suffix in "[0-9]{0,4}",
        name in name_strategy(),
    ) {
        let classifier = AccountClassifier::default();
        let account = Account::leaf(&format!("1120{suffix}"), &name, AccountType::Asset);

        prop_assert_eq!(classifier.classify(&account).category, AccountCategory::Bank);
    }
}
