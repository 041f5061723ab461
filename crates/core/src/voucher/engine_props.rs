//! Property-based tests for voucher validation.
//!
//! Properties covered:
//! - Balanced journal vouchers over plain accounts always pass
//! - Journal vouchers off by more than one cent always fail as unbalanced
//! - Builder-assembled payment vouchers always balance

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tenura_shared::types::AccountId;

use super::builder::VoucherBuilder;
use super::engine::VoucherValidationEngine;
use super::error::VoucherError;
use super::types::{VoucherLineInput, VoucherType};
use crate::accounts::{Account, AccountType};

/// Amounts from 0.01 to 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

/// Expense accounts on the debit side, income accounts on the credit side.
fn chart(debits: usize, credits: usize) -> (Vec<Account>, Vec<Account>) {
    let debit_accounts = (0..debits)
        .map(|i| Account::leaf(&format!("5{i:03}"), "Operating expense", AccountType::Expense))
        .collect();
    let credit_accounts = (0..credits)
        .map(|i| Account::leaf(&format!("4{i:03}"), "Other income", AccountType::Income))
        .collect();
    (debit_accounts, credit_accounts)
}

fn index(accounts: &[Account]) -> HashMap<AccountId, Account> {
    accounts.iter().map(|a| (a.id, a.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Splitting one total across any number of credit lines still balances.
    #[test]
    fn prop_balanced_journal_passes(
        parts in prop::collection::vec(positive_amount(), 1..6),
    ) {
        let total: Decimal = parts.iter().sum();
        let (debits, credits) = chart(1, parts.len());
        let mut builder = VoucherBuilder::new(VoucherType::Jv, date())
            .with_line(VoucherLineInput::debit(debits[0].id, total));
        for (account, amount) in credits.iter().zip(&parts) {
            builder = builder.with_line(VoucherLineInput::credit(account.id, *amount));
        }
        let voucher = builder.build().unwrap();

        let accounts = index(&[debits, credits].concat());
        let result = VoucherValidationEngine::default()
            .validate(&voucher, |id| accounts.get(&id).cloned());
        prop_assert_eq!(result, Ok(()));
    }

    /// A debit/credit gap above the tolerance is always reported as unbalanced.
    #[test]
    fn prop_unbalanced_journal_rejected(
        amount in positive_amount(),
        gap_cents in 2i64..1_000_000i64,
    ) {
        let gap = Decimal::new(gap_cents, 2);
        let (debits, credits) = chart(1, 1);
        let voucher = VoucherBuilder::new(VoucherType::Jv, date())
            .with_line(VoucherLineInput::debit(debits[0].id, amount + gap))
            .with_line(VoucherLineInput::credit(credits[0].id, amount))
            .build()
            .unwrap();

        let accounts = index(&[debits, credits].concat());
        let result = VoucherValidationEngine::default()
            .validate(&voucher, |id| accounts.get(&id).cloned());
        prop_assert_eq!(
            result,
            Err(VoucherError::Unbalanced { debit: amount + gap, credit: amount })
        );
    }

    /// The synthesized control line always matches the user lines exactly.
    #[test]
    fn prop_built_payment_voucher_balances(
        parts in prop::collection::vec(positive_amount(), 1..6),
    ) {
        let bank = Account::leaf("1120-01", "Operating account", AccountType::Asset);
        let (debits, _) = chart(parts.len(), 0);
        let mut builder = VoucherBuilder::new(VoucherType::Bpv, date())
            .with_control_account(bank.id);
        for (account, amount) in debits.iter().zip(&parts) {
            builder = builder.with_line(VoucherLineInput::debit(account.id, *amount));
        }
        let voucher = builder.build().unwrap();

        let (debit, credit) = voucher.totals();
        prop_assert_eq!(debit, credit);

        let mut accounts = index(&debits);
        accounts.insert(bank.id, bank);
        let result = VoucherValidationEngine::default()
            .validate(&voucher, |id| accounts.get(&id).cloned());
        prop_assert_eq!(result, Ok(()));
    }
}
