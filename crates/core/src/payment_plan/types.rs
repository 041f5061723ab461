//! Payment plan types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tenura_shared::types::{DealId, InstallmentId, PaymentPlanId};

/// Spacing between installments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Every month.
    Monthly,
    /// Every three months.
    Quarterly,
    /// Every six months.
    BiAnnual,
    /// Every twelve months.
    Annual,
    /// Caller-supplied amounts and dates.
    Custom,
    /// Construction milestones, caller-supplied amounts and dates.
    Milestone,
}

impl Cadence {
    /// Months between installments; `None` for caller-supplied schedules.
    #[must_use]
    pub const fn months(self) -> Option<u32> {
        match self {
            Self::Monthly => Some(1),
            Self::Quarterly => Some(3),
            Self::BiAnnual => Some(6),
            Self::Annual => Some(12),
            Self::Custom | Self::Milestone => None,
        }
    }
}

/// Installment status, derived from amounts and due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Nothing paid, not yet due.
    Unpaid,
    /// Partly paid.
    Partial,
    /// Fully paid.
    Paid,
    /// Nothing paid, past due.
    Overdue,
}

/// One scheduled installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Installment ID.
    pub id: InstallmentId,
    /// 1-based position in the plan.
    pub number: u32,
    /// Amount due.
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Amount paid so far.
    #[serde(default)]
    pub paid_amount: Decimal,
    /// Last derived status.
    pub status: InstallmentStatus,
    /// True for the down payment installment.
    #[serde(default)]
    pub is_down_payment: bool,
}

impl Installment {
    /// Amount still owed, never negative.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        (self.amount - self.paid_amount).max(Decimal::ZERO)
    }
}

/// An installment plan attached to a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlan {
    /// Plan ID.
    pub id: PaymentPlanId,
    /// Deal the plan belongs to.
    pub deal_id: DealId,
    /// Plan total.
    pub total_amount: Decimal,
    /// Down payment included in the total.
    pub down_payment: Decimal,
    /// Installment spacing.
    pub cadence: Cadence,
    /// First due date.
    pub start_date: NaiveDate,
    /// Installments ordered by number.
    pub installments: Vec<Installment>,
}

impl PaymentPlan {
    /// Sum of paid amounts across installments.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.installments.iter().map(|i| i.paid_amount).sum()
    }

    /// Sum of outstanding amounts across installments.
    #[must_use]
    pub fn total_outstanding(&self) -> Decimal {
        self.installments.iter().map(Installment::outstanding).sum()
    }
}

/// Request to create a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Deal the plan belongs to.
    pub deal_id: DealId,
    /// Plan total.
    pub total_amount: Decimal,
    /// Down payment, zero for none.
    #[serde(default)]
    pub down_payment: Decimal,
    /// Number of installments, the down payment included.
    pub installment_count: u32,
    /// Installment spacing.
    pub cadence: Cadence,
    /// First due date.
    pub start_date: NaiveDate,
    /// Amounts for custom and milestone cadences.
    #[serde(default)]
    pub custom_amounts: Vec<Decimal>,
    /// Due dates for custom and milestone cadences.
    #[serde(default)]
    pub custom_dates: Vec<NaiveDate>,
}
