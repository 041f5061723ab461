//! Property-based tests for schedule generation and allocation.
//!
//! Properties covered:
//! - Generated schedules sum exactly to the plan total
//! - Allocation never overpays and conserves the payment amount

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tenura_shared::types::DealId;

use super::allocation::allocate;
use super::schedule::generate_schedule;
use super::types::{Cadence, PlanRequest};

/// Totals from 1,000.00 to 10,000,000.00.
fn total_amount() -> impl Strategy<Value = Decimal> {
    (100_000i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn cadence() -> impl Strategy<Value = Cadence> {
    prop_oneof![
        Just(Cadence::Monthly),
        Just(Cadence::Quarterly),
        Just(Cadence::BiAnnual),
        Just(Cadence::Annual),
    ]
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Installments always sum to the total and are each positive.
    #[test]
    fn prop_schedule_sums_to_total(
        total in total_amount(),
        down_pct in 0u32..50u32,
        count in 2u32..120u32,
        cadence in cadence(),
    ) {
        let down_payment = (total * Decimal::from(down_pct) / Decimal::from(100)).round_dp(2);
        let request = PlanRequest {
            deal_id: DealId::new(),
            total_amount: total,
            down_payment,
            installment_count: count,
            cadence,
            start_date: start(),
            custom_amounts: Vec::new(),
            custom_dates: Vec::new(),
        };

        let plan = generate_schedule(&request, start()).unwrap();
        let sum: Decimal = plan.installments.iter().map(|i| i.amount).sum();

        prop_assert_eq!(sum, total);
        prop_assert_eq!(plan.installments.len(), count as usize);
        prop_assert!(plan.installments.iter().all(|i| i.amount > Decimal::ZERO));
        for pair in plan.installments.windows(2) {
            prop_assert!(pair[0].due_date < pair[1].due_date);
        }
    }

    /// Applied plus excess equals the payment, and no installment is overpaid.
    #[test]
    fn prop_allocation_conserves_payment(
        total in total_amount(),
        count in 1u32..24u32,
        payments in prop::collection::vec((1i64..500_000_000i64).prop_map(|c| Decimal::new(c, 2)), 1..5),
    ) {
        let request = PlanRequest {
            deal_id: DealId::new(),
            total_amount: total,
            down_payment: Decimal::ZERO,
            installment_count: count,
            cadence: Cadence::Monthly,
            start_date: start(),
            custom_amounts: Vec::new(),
            custom_dates: Vec::new(),
        };
        let mut plan = generate_schedule(&request, start()).unwrap();

        for amount in payments {
            let outcome = allocate(&plan, amount, start()).unwrap();
            prop_assert_eq!(outcome.applied + outcome.excess, amount);
            plan.apply_allocation(&outcome, start()).unwrap();
            prop_assert_eq!(plan.total_paid(), outcome.total_paid_after);
            for installment in &plan.installments {
                prop_assert!(installment.paid_amount <= installment.amount);
            }
        }
        prop_assert!(plan.total_paid() <= total);
    }
}
