//! Store and service errors.

use tenura_core::import::ImportError;
use tenura_core::ledger::LedgerSourceKind;
use tenura_core::payment_plan::PaymentPlanError;
use tenura_core::safety::SafetyError;
use tenura_core::voucher::VoucherError;
use tenura_shared::AppError;
use tenura_shared::types::{AccountId, DealId, JournalEntryId};
use thiserror::Error;

/// Errors raised by repository implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Record kind.
        entity: &'static str,
        /// Record ID.
        id: String,
    },

    /// Write conflicts with the current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An atomic write was rejected by a domain check.
    #[error(transparent)]
    Plan(#[from] PaymentPlanError),

    /// An atomic write was rejected by a safety re-check.
    #[error(transparent)]
    Safety(#[from] SafetyError),

    /// Backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Plan(e) => e.error_code(),
            Self::Safety(e) => e.error_code(),
            Self::Backend(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Conflict(_) => 409,
            Self::Plan(e) => e.http_status_code(),
            Self::Safety(e) => e.http_status_code(),
            Self::Backend(_) => 500,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Backend(msg) => Self::Database(msg),
            other => Self::from_status(other.http_status_code(), other.to_string()),
        }
    }
}

/// Errors raised by a ledger source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source does not exist in this deployment (e.g., table not migrated).
    ///
    /// Distinct from an empty result; the next source is tried.
    #[error("Ledger source {source_kind} unavailable: {reason}")]
    Unavailable {
        /// Source kind.
        source_kind: LedgerSourceKind,
        /// Why it is unavailable.
        reason: String,
    },

    /// Any other failure; propagated to the caller.
    #[error("Ledger source {source_kind} failed: {error}")]
    Failed {
        /// Source kind.
        source_kind: LedgerSourceKind,
        /// Underlying error.
        error: StoreError,
    },
}

/// Errors raised by the orchestration services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Voucher rejected.
    #[error(transparent)]
    Voucher(#[from] VoucherError),

    /// Safety check failed.
    #[error(transparent)]
    Safety(#[from] SafetyError),

    /// Payment plan rejected.
    #[error(transparent)]
    Plan(#[from] PaymentPlanError),

    /// Lead import lifecycle violation.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Ledger source failure.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Repository failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Deal does not exist.
    #[error("Deal not found: {0}")]
    DealNotFound(DealId),

    /// Deal has no payment plan.
    #[error("Deal {0} has no payment plan")]
    PlanNotFound(DealId),

    /// Journal entry does not exist.
    #[error("Journal entry not found: {0}")]
    JournalNotFound(JournalEntryId),

    /// Journal entry was already reversed.
    #[error("Journal entry {0} is already reversed")]
    AlreadyReversed(JournalEntryId),

    /// A configured system account is missing from the chart.
    #[error("{role} account {code} is not in the chart of accounts")]
    SystemAccountMissing {
        /// What the account is used for.
        role: &'static str,
        /// Configured account code.
        code: String,
    },

    /// Deposit account is not a cash or bank account.
    #[error("Account {0} is not a cash or bank account")]
    InvalidDepositAccount(AccountId),
}

impl ServiceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Voucher(e) => e.error_code(),
            Self::Safety(e) => e.error_code(),
            Self::Plan(e) => e.error_code(),
            Self::Import(e) => e.error_code(),
            Self::Source(SourceError::Unavailable { .. }) => "SOURCE_UNAVAILABLE",
            Self::Source(SourceError::Failed { error, .. }) | Self::Store(error) => {
                error.error_code()
            }
            Self::DealNotFound(_) => "DEAL_NOT_FOUND",
            Self::PlanNotFound(_) => "PLAN_NOT_FOUND",
            Self::JournalNotFound(_) => "JOURNAL_NOT_FOUND",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::SystemAccountMissing { .. } => "SYSTEM_ACCOUNT_MISSING",
            Self::InvalidDepositAccount(_) => "INVALID_DEPOSIT_ACCOUNT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Voucher(e) => e.http_status_code(),
            Self::Safety(e) => e.http_status_code(),
            Self::Plan(e) => e.http_status_code(),
            Self::Import(e) => e.http_status_code(),
            Self::Source(SourceError::Unavailable { .. }) => 503,
            Self::Source(SourceError::Failed { error, .. }) | Self::Store(error) => {
                error.http_status_code()
            }
            Self::DealNotFound(_) | Self::PlanNotFound(_) | Self::JournalNotFound(_) => 404,
            Self::AlreadyReversed(_) => 409,
            Self::InvalidDepositAccount(_) => 400,
            Self::SystemAccountMissing { .. } => 500,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(store) => store.into(),
            other => Self::from_status(other.http_status_code(), other.to_string()),
        }
    }
}
