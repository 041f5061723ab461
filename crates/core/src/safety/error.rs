//! Safety check errors.

use rust_decimal::Decimal;
use tenura_shared::AppError;
use tenura_shared::types::{AccountId, DealId};
use thiserror::Error;

use crate::accounts::AccountCategory;
use crate::deal::{DealStatus, PaymentMode};

/// Violations raised by [`super::AccountingSafetyService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SafetyError {
    // ========== Linkage ==========
    /// Invoice has no tenant.
    #[error("Invoice must be linked to a tenant")]
    MissingTenant,

    /// Payment has no deal.
    #[error("Payment must be linked to a deal")]
    MissingDeal,

    /// Referenced deal does not exist.
    #[error("Deal not found: {0}")]
    DealNotFound(DealId),

    /// Deal is not in a billable state.
    #[error("Deal must be approved or active, current status is {status:?}")]
    DealNotApproved {
        /// Current deal status.
        status: DealStatus,
    },

    /// Transaction touches cash, bank or income with no business object.
    #[error("Transactions touching cash, bank or income accounts need an invoice, tenant or dealer reference")]
    NoLifecycleContext,

    // ========== Amounts ==========
    /// Amount or total is not positive.
    #[error("Amount must be greater than zero, got {0}")]
    ZeroAmount(Decimal),

    /// Payment would overpay the linked invoice.
    #[error("Payment of {amount} exceeds the invoice's remaining balance of {remaining}")]
    ExceedsOutstanding {
        /// Payment amount.
        amount: Decimal,
        /// Remaining invoice balance.
        remaining: Decimal,
    },

    /// Debits and credits differ by more than the tolerance.
    #[error("Transaction is unbalanced: debit={debit}, credit={credit}")]
    Unbalanced {
        /// Total debits.
        debit: Decimal,
        /// Total credits.
        credit: Decimal,
    },

    /// Fewer than two lines.
    #[error("Transaction must have at least 2 lines")]
    InsufficientLines,

    /// Reference number already used for this payment mode.
    #[error("Reference {reference} already recorded for a {mode} payment")]
    DuplicateReference {
        /// Payment mode.
        mode: PaymentMode,
        /// Reference number.
        reference: String,
    },

    // ========== Accounts ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Cash, bank or equity account used for invoice posting.
    #[error("Account {code} cannot be used for invoice posting")]
    ForbiddenAccountCategory {
        /// Account code.
        code: String,
    },

    /// Invoice debit account is not a receivable.
    #[error("Invoice debit account must be accounts receivable, got {actual}")]
    WrongDebitAccount {
        /// Category of the supplied account.
        actual: AccountCategory,
    },

    /// Invoice credit account is not an income account.
    #[error("Invoice credit account {code} must be an income account")]
    WrongCreditAccount {
        /// Account code.
        code: String,
    },

    // ========== Lifecycle ==========
    /// Record already has a journal entry or ledger rows.
    #[error("{record} is already posted; reverse it instead of editing")]
    AlreadyPosted {
        /// Human-readable record description.
        record: String,
    },
}

impl SafetyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTenant => "MISSING_TENANT",
            Self::MissingDeal => "MISSING_DEAL",
            Self::DealNotFound(_) => "DEAL_NOT_FOUND",
            Self::DealNotApproved { .. } => "DEAL_NOT_APPROVED",
            Self::NoLifecycleContext => "NO_LIFECYCLE_CONTEXT",
            Self::ZeroAmount(_) => "ZERO_AMOUNT",
            Self::ExceedsOutstanding { .. } => "EXCEEDS_OUTSTANDING",
            Self::Unbalanced { .. } => "UNBALANCED",
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::DuplicateReference { .. } => "DUPLICATE_REFERENCE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ForbiddenAccountCategory { .. } => "FORBIDDEN_ACCOUNT_CATEGORY",
            Self::WrongDebitAccount { .. } => "WRONG_DEBIT_ACCOUNT",
            Self::WrongCreditAccount { .. } => "WRONG_CREDIT_ACCOUNT",
            Self::AlreadyPosted { .. } => "ALREADY_POSTED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::DealNotFound(_) | Self::AccountNotFound(_) => 404,
            Self::AlreadyPosted { .. } | Self::DuplicateReference { .. } => 409,
            _ => 400,
        }
    }
}

impl From<SafetyError> for AppError {
    fn from(err: SafetyError) -> Self {
        Self::from_status(err.http_status_code(), err.to_string())
    }
}
