//! Payment plan errors.

use rust_decimal::Decimal;
use tenura_shared::AppError;
use thiserror::Error;

/// Errors raised while generating a schedule or allocating a payment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentPlanError {
    /// Plan total is not positive.
    #[error("Plan total must be greater than zero, got {0}")]
    ZeroTotal(Decimal),

    /// Down payment is negative, exceeds the total, or leaves nothing to schedule.
    #[error("Invalid down payment {down_payment} for plan total {total}")]
    InvalidDownPayment {
        /// Down payment.
        down_payment: Decimal,
        /// Plan total.
        total: Decimal,
    },

    /// Not enough installments to carry the plan.
    #[error("Plan needs more installments, got {count}")]
    TooFewInstallments {
        /// Requested installment count.
        count: u32,
    },

    /// Custom amounts do not add up to the plan total.
    #[error("Installment amounts sum to {actual}, expected {expected}")]
    CustomAmountsMismatch {
        /// Plan total.
        expected: Decimal,
        /// Sum of supplied amounts.
        actual: Decimal,
    },

    /// Custom dates do not pair up with custom amounts.
    #[error("Got {dates} due dates for {amounts} installment amounts")]
    CustomDatesCountMismatch {
        /// Number of amounts.
        amounts: usize,
        /// Number of dates.
        dates: usize,
    },

    /// An installment would carry a zero or negative amount.
    #[error("Installment {number} must be greater than zero")]
    NonPositiveInstallment {
        /// Installment number.
        number: u32,
    },

    /// A due date falls outside the supported calendar.
    #[error("Due date of installment {number} is out of range")]
    DateOutOfRange {
        /// Installment number.
        number: u32,
    },

    /// Payment amount is not positive.
    #[error("Payment amount must be greater than zero, got {0}")]
    NonPositivePayment(Decimal),

    /// Applying an allocation would overpay an installment.
    #[error("Installment {number} would be overpaid; reload the plan and retry")]
    Overallocated {
        /// Installment number.
        number: u32,
    },

    /// The plan changed between computing and applying an allocation.
    #[error("Installment {number} changed since the allocation was computed; retry")]
    StaleAllocation {
        /// Installment number.
        number: u32,
    },

    /// An allocation slice refers to an installment the plan does not have.
    #[error("Installment {number} is not part of this plan")]
    UnknownInstallment {
        /// Installment number.
        number: u32,
    },
}

impl PaymentPlanError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroTotal(_) => "ZERO_TOTAL",
            Self::InvalidDownPayment { .. } => "INVALID_DOWN_PAYMENT",
            Self::TooFewInstallments { .. } => "TOO_FEW_INSTALLMENTS",
            Self::CustomAmountsMismatch { .. } => "CUSTOM_AMOUNTS_MISMATCH",
            Self::CustomDatesCountMismatch { .. } => "CUSTOM_DATES_COUNT_MISMATCH",
            Self::NonPositiveInstallment { .. } => "NON_POSITIVE_INSTALLMENT",
            Self::DateOutOfRange { .. } => "DATE_OUT_OF_RANGE",
            Self::NonPositivePayment(_) => "NON_POSITIVE_PAYMENT",
            Self::Overallocated { .. } => "OVERALLOCATED",
            Self::StaleAllocation { .. } => "STALE_ALLOCATION",
            Self::UnknownInstallment { .. } => "UNKNOWN_INSTALLMENT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Overallocated { .. }
            | Self::StaleAllocation { .. }
            | Self::UnknownInstallment { .. } => 409,
            _ => 400,
        }
    }
}

impl From<PaymentPlanError> for AppError {
    fn from(err: PaymentPlanError) -> Self {
        Self::from_status(err.http_status_code(), err.to_string())
    }
}
