//! Installment status derivation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tenura_shared::types::TOLERANCE;

use super::types::{Installment, InstallmentStatus};

/// Derives an installment's status.
///
/// Paid wins when the paid amount is within a cent of the amount; otherwise
/// nothing paid is unpaid or overdue depending on `today`, anything else is
/// partial.
#[must_use]
pub fn derive_status(
    amount: Decimal,
    paid_amount: Decimal,
    due_date: NaiveDate,
    today: NaiveDate,
) -> InstallmentStatus {
    if paid_amount >= amount - TOLERANCE {
        InstallmentStatus::Paid
    } else if paid_amount <= Decimal::ZERO {
        if due_date < today {
            InstallmentStatus::Overdue
        } else {
            InstallmentStatus::Unpaid
        }
    } else {
        InstallmentStatus::Partial
    }
}

impl Installment {
    /// Re-derives `status` as of `today`.
    pub fn refresh_status(&mut self, today: NaiveDate) {
        self.status = derive_status(self.amount, self.paid_amount, self.due_date, today);
    }
}
