//! Installment schedule generation.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use tenura_shared::types::{InstallmentId, PaymentPlanId, round2, within_tolerance};

use super::error::PaymentPlanError;
use super::status::derive_status;
use super::types::{Installment, PaymentPlan, PlanRequest};

/// Generates a plan from a request.
///
/// For fixed cadences a positive down payment becomes installment #1 at the
/// start date and the rest is split evenly over the remaining count, the last
/// installment absorbing the rounding remainder. Installment `n` is due
/// `months * (n - 1)` after the start date, clamped to month end.
///
/// Custom and milestone cadences take the caller's amounts and dates as-is.
///
/// # Errors
///
/// Returns `PaymentPlanError` if the request cannot produce a plan whose
/// installments sum exactly to its total.
pub fn generate_schedule(
    request: &PlanRequest,
    today: NaiveDate,
) -> Result<PaymentPlan, PaymentPlanError> {
    if request.total_amount <= Decimal::ZERO {
        return Err(PaymentPlanError::ZeroTotal(request.total_amount));
    }
    if request.down_payment < Decimal::ZERO || request.down_payment > request.total_amount {
        return Err(PaymentPlanError::InvalidDownPayment {
            down_payment: request.down_payment,
            total: request.total_amount,
        });
    }

    let schedule = match request.cadence.months() {
        Some(months) => fixed_schedule(request, months)?,
        None => custom_schedule(request)?,
    };

    let installments = schedule
        .into_iter()
        .zip(1u32..)
        .map(|((amount, due_date, is_down_payment), number)| Installment {
            id: InstallmentId::new(),
            number,
            amount,
            due_date,
            paid_amount: Decimal::ZERO,
            status: derive_status(amount, Decimal::ZERO, due_date, today),
            is_down_payment,
        })
        .collect();

    Ok(PaymentPlan {
        id: PaymentPlanId::new(),
        deal_id: request.deal_id,
        total_amount: request.total_amount,
        down_payment: request.down_payment,
        cadence: request.cadence,
        start_date: request.start_date,
        installments,
    })
}

type Slot = (Decimal, NaiveDate, bool);

fn fixed_schedule(request: &PlanRequest, months: u32) -> Result<Vec<Slot>, PaymentPlanError> {
    let count = request.installment_count;
    if count < 1 {
        return Err(PaymentPlanError::TooFewInstallments { count });
    }

    let has_down_payment = request.down_payment > Decimal::ZERO;
    let remaining = request.total_amount - request.down_payment;
    let recurring = if has_down_payment { count - 1 } else { count };

    if recurring == 0 && remaining > Decimal::ZERO {
        return Err(PaymentPlanError::TooFewInstallments { count });
    }
    if recurring > 0 && remaining <= Decimal::ZERO {
        return Err(PaymentPlanError::InvalidDownPayment {
            down_payment: request.down_payment,
            total: request.total_amount,
        });
    }

    let mut amounts = Vec::with_capacity(count as usize);
    if has_down_payment {
        amounts.push((request.down_payment, true));
    }
    if recurring > 0 {
        let each = round2(remaining / Decimal::from(recurring));
        let mut scheduled = Decimal::ZERO;
        for _ in 1..recurring {
            amounts.push((each, false));
            scheduled += each;
        }
        amounts.push((remaining - scheduled, false));
    }

    amounts
        .into_iter()
        .zip(1u32..)
        .map(|((amount, is_down_payment), number)| {
            if amount <= Decimal::ZERO {
                return Err(PaymentPlanError::NonPositiveInstallment { number });
            }
            let due = due_date(request.start_date, months, number)
                .ok_or(PaymentPlanError::DateOutOfRange { number })?;
            Ok((amount, due, is_down_payment))
        })
        .collect()
}

fn custom_schedule(request: &PlanRequest) -> Result<Vec<Slot>, PaymentPlanError> {
    let amounts = &request.custom_amounts;
    if amounts.is_empty() {
        return Err(PaymentPlanError::TooFewInstallments { count: 0 });
    }
    if let Some(number) = amounts
        .iter()
        .zip(1u32..)
        .find(|(amount, _)| **amount <= Decimal::ZERO)
        .map(|(_, number)| number)
    {
        return Err(PaymentPlanError::NonPositiveInstallment { number });
    }

    let actual: Decimal = amounts.iter().sum();
    if !within_tolerance(actual, request.total_amount) {
        return Err(PaymentPlanError::CustomAmountsMismatch {
            expected: request.total_amount,
            actual,
        });
    }
    if request.custom_dates.len() != amounts.len() {
        return Err(PaymentPlanError::CustomDatesCountMismatch {
            amounts: amounts.len(),
            dates: request.custom_dates.len(),
        });
    }

    let mut slots: Vec<Slot> = amounts
        .iter()
        .zip(&request.custom_dates)
        .map(|(amount, date)| (*amount, *date, false))
        .collect();

    // Sub-cent drift lands on the last installment so the plan sums exactly.
    let drift = request.total_amount - actual;
    if let Some(last) = slots.last_mut() {
        last.0 += drift;
    }
    if let Some(first) = slots.first_mut() {
        first.2 = request.down_payment > Decimal::ZERO && first.0 == request.down_payment;
    }

    Ok(slots)
}

/// Due date of installment `number` (1-based).
fn due_date(start: NaiveDate, months: u32, number: u32) -> Option<NaiveDate> {
    let offset = months.checked_mul(number - 1)?;
    start.checked_add_months(Months::new(offset))
}
