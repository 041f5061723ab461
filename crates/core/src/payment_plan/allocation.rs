//! FIFO payment allocation.
//!
//! An incoming payment is applied to installments in ascending number, each
//! taking `min(remaining payment, installment outstanding)`. Whatever is left
//! once every installment is settled is reported as excess and never applied.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tenura_shared::types::{InstallmentId, PaymentPlanId, TOLERANCE};

use super::error::PaymentPlanError;
use super::status::derive_status;
use super::types::{InstallmentStatus, PaymentPlan};
use crate::deal::DealStatus;

/// The part of a payment applied to one installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSlice {
    /// Installment ID.
    pub installment_id: InstallmentId,
    /// Installment number.
    pub number: u32,
    /// Paid amount before this slice.
    pub paid_before: Decimal,
    /// Amount applied.
    pub applied: Decimal,
    /// Paid amount after this slice.
    pub paid_after: Decimal,
    /// Status after this slice.
    pub status_after: InstallmentStatus,
}

/// Result of allocating one payment against a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// Plan allocated against.
    pub plan_id: PaymentPlanId,
    /// Incoming payment amount.
    pub amount: Decimal,
    /// Slices in installment order.
    pub slices: Vec<AllocationSlice>,
    /// Sum of applied amounts.
    pub applied: Decimal,
    /// Amount beyond total outstanding, left for the caller to refund or hold.
    pub excess: Decimal,
    /// Plan total paid once the slices are applied.
    pub total_paid_after: Decimal,
}

impl AllocationOutcome {
    /// Returns true if nothing would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Computes how `amount` spreads over the plan's installments.
///
/// The plan is not modified; apply the outcome with
/// [`PaymentPlan::apply_allocation`].
///
/// # Errors
///
/// Returns `PaymentPlanError::NonPositivePayment` if `amount <= 0`.
pub fn allocate(
    plan: &PaymentPlan,
    amount: Decimal,
    today: NaiveDate,
) -> Result<AllocationOutcome, PaymentPlanError> {
    if amount <= Decimal::ZERO {
        return Err(PaymentPlanError::NonPositivePayment(amount));
    }

    let mut ordered: Vec<_> = plan.installments.iter().collect();
    ordered.sort_by_key(|i| i.number);

    let mut remaining = amount;
    let mut slices = Vec::new();
    for installment in ordered {
        if remaining <= Decimal::ZERO {
            break;
        }
        let outstanding = installment.outstanding();
        if outstanding <= Decimal::ZERO {
            continue;
        }

        let applied = remaining.min(outstanding);
        let paid_after = installment.paid_amount + applied;
        remaining -= applied;
        slices.push(AllocationSlice {
            installment_id: installment.id,
            number: installment.number,
            paid_before: installment.paid_amount,
            applied,
            paid_after,
            status_after: derive_status(installment.amount, paid_after, installment.due_date, today),
        });
    }

    let applied = amount - remaining;
    Ok(AllocationOutcome {
        plan_id: plan.id,
        amount,
        slices,
        applied,
        excess: remaining,
        total_paid_after: plan.total_paid() + applied,
    })
}

impl PaymentPlan {
    /// Applies a previously computed allocation.
    ///
    /// Every slice is checked before anything is changed: the installment must
    /// still have the paid amount the slice was computed from, and must not end
    /// up overpaid. On error the plan is left untouched.
    pub fn apply_allocation(
        &mut self,
        outcome: &AllocationOutcome,
        today: NaiveDate,
    ) -> Result<(), PaymentPlanError> {
        let mut targets = Vec::with_capacity(outcome.slices.len());
        for slice in &outcome.slices {
            let idx = self
                .installments
                .iter()
                .position(|i| i.id == slice.installment_id)
                .ok_or(PaymentPlanError::UnknownInstallment {
                    number: slice.number,
                })?;
            let installment = &self.installments[idx];
            if installment.paid_amount != slice.paid_before {
                return Err(PaymentPlanError::StaleAllocation {
                    number: installment.number,
                });
            }
            if installment.paid_amount + slice.applied > installment.amount {
                return Err(PaymentPlanError::Overallocated {
                    number: installment.number,
                });
            }
            targets.push((idx, slice.applied));
        }

        for (idx, applied) in targets {
            let installment = &mut self.installments[idx];
            installment.paid_amount += applied;
            installment.refresh_status(today);
        }
        Ok(())
    }
}

/// Returns true if the deal should move to closed-won after an allocation.
///
/// Already closed deals never complete again.
#[must_use]
pub fn completes_deal(deal_amount: Decimal, status: DealStatus, total_paid: Decimal) -> bool {
    !status.is_closed() && total_paid >= deal_amount - TOLERANCE
}
