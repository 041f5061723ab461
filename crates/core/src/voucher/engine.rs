//! Voucher validation engine.
//!
//! Validation order:
//! 1. Every referenced account exists and is postable (leaf)
//! 2. Control account category (payment/receipt vouchers)
//! 3. Per-line amount and category rules
//! 4. Totals and balance
//!
//! The engine only reads; the caller writes the journal after a successful
//! pass, inside one atomic write.

use rust_decimal::Decimal;
use tenura_shared::types::{AccountId, within_tolerance};

use crate::accounts::{Account, AccountClassifier, Classification};

use super::error::VoucherError;
use super::rules::{ControlRule, VoucherRule};
use super::types::{LineOrigin, Voucher, VoucherLine};

/// Stateless validator for assembled vouchers.
#[derive(Debug, Clone, Default)]
pub struct VoucherValidationEngine {
    classifier: AccountClassifier,
}

impl VoucherValidationEngine {
    /// Creates an engine using the given account classifier.
    #[must_use]
    pub fn new(classifier: AccountClassifier) -> Self {
        Self { classifier }
    }

    /// Validates a voucher against the posting rules of its kind.
    ///
    /// # Arguments
    ///
    /// * `voucher` - The assembled voucher (see [`super::VoucherBuilder`])
    /// * `account_lookup` - Resolves an account by ID
    ///
    /// # Errors
    ///
    /// Returns the first `VoucherError` found.
    pub fn validate<A>(&self, voucher: &Voucher, account_lookup: A) -> Result<(), VoucherError>
    where
        A: Fn(AccountId) -> Option<Account>,
    {
        let classes = self.resolve_accounts(voucher, &account_lookup)?;
        let rule = voucher.voucher_type.rule();

        match rule.control {
            None => Self::validate_journal(voucher, rule, &classes),
            Some(control) => Self::validate_control(voucher, rule, control, &classes),
        }
    }

    /// Resolves and classifies the account of every line, control line included.
    fn resolve_accounts<A>(
        &self,
        voucher: &Voucher,
        account_lookup: &A,
    ) -> Result<Vec<Classification>, VoucherError>
    where
        A: Fn(AccountId) -> Option<Account>,
    {
        voucher
            .lines
            .iter()
            .map(|line| {
                let account = account_lookup(line.account_id)
                    .ok_or(VoucherError::AccountNotFound(line.account_id))?;
                if !account.is_postable {
                    return Err(VoucherError::NonPostableAccount {
                        account_id: account.id,
                        code: account.code,
                    });
                }
                Ok(self.classifier.classify(&account))
            })
            .collect()
    }

    fn validate_journal(
        voucher: &Voucher,
        rule: &VoucherRule,
        classes: &[Classification],
    ) -> Result<(), VoucherError> {
        if voucher.control_line().is_some() {
            return Err(VoucherError::UnexpectedControlAccount);
        }

        if voucher.lines.len() < 2 {
            return Err(VoucherError::InsufficientLines {
                count: voucher.lines.len(),
            });
        }

        for (idx, (line, class)) in voucher.lines.iter().zip(classes).enumerate() {
            let number = idx + 1;
            check_line_amounts(number, line)?;
            if rule.forbids_category(class.category) {
                return Err(VoucherError::ForbiddenControlAccount {
                    line: number,
                    category: class.category,
                });
            }
        }

        let (debit, credit) = voucher.totals();
        if debit <= Decimal::ZERO || credit <= Decimal::ZERO {
            return Err(VoucherError::ZeroTotal);
        }
        if !within_tolerance(debit, credit) {
            return Err(VoucherError::Unbalanced { debit, credit });
        }

        Ok(())
    }

    fn validate_control(
        voucher: &Voucher,
        rule: &VoucherRule,
        control: ControlRule,
        classes: &[Classification],
    ) -> Result<(), VoucherError> {
        let mut control_positions = voucher
            .lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.origin == LineOrigin::Control)
            .map(|(idx, _)| idx);
        let Some(control_idx) = control_positions.next() else {
            return Err(VoucherError::MissingControlAccount);
        };
        if control_positions.next().is_some() {
            return Err(VoucherError::UnexpectedControlAccount);
        }

        let actual = classes[control_idx].category;
        if actual != control.category {
            return Err(VoucherError::WrongControlCategory {
                expected: control.category,
                actual,
            });
        }

        let user_lines: Vec<(&VoucherLine, &Classification)> = voucher
            .lines
            .iter()
            .zip(classes)
            .filter(|(l, _)| l.origin == LineOrigin::User)
            .collect();
        if user_lines.is_empty() {
            return Err(VoucherError::NoUserLines);
        }

        let user_side = control.user_side();
        for (idx, (line, class)) in user_lines.iter().enumerate() {
            let number = idx + 1;
            if rule.forbids_category(class.category) {
                return Err(VoucherError::SystemAccountInLine {
                    line: number,
                    category: class.category,
                });
            }
            check_line_amounts(number, line)?;
            if line.amount_on(user_side) <= Decimal::ZERO {
                return Err(VoucherError::WrongSideAmount {
                    line: number,
                    expected: user_side,
                });
            }
            if !rule.allows_class(class.class) {
                return Err(VoucherError::ForbiddenLineCategory {
                    line: number,
                    class: class.class,
                    side: user_side,
                });
            }
        }

        let user_total: Decimal = user_lines
            .iter()
            .map(|(l, _)| l.amount_on(user_side))
            .sum();
        if user_total <= Decimal::ZERO {
            return Err(VoucherError::ZeroUserTotal);
        }

        let control_line = &voucher.lines[control_idx];
        let control_amount = control_line.amount_on(control.side);
        if control_line.amount_on(user_side) != Decimal::ZERO
            || !within_tolerance(control_amount, user_total)
        {
            let (debit, credit) = voucher.totals();
            return Err(VoucherError::Unbalanced { debit, credit });
        }

        Ok(())
    }
}

/// Checks that a line carries exactly one positive amount.
fn check_line_amounts(number: usize, line: &VoucherLine) -> Result<(), VoucherError> {
    if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
        return Err(VoucherError::BelowZero { line: number });
    }
    match (line.debit > Decimal::ZERO, line.credit > Decimal::ZERO) {
        (true, true) => Err(VoucherError::TwoSidedLine { line: number }),
        (false, false) => Err(VoucherError::ZeroValueLine { line: number }),
        _ => Ok(()),
    }
}
