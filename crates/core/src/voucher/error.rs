//! Voucher validation errors.

use rust_decimal::Decimal;
use tenura_shared::AppError;
use tenura_shared::types::AccountId;
use thiserror::Error;

use crate::accounts::{AccountCategory, AccountType};

use super::types::EntryType;

/// Errors raised while assembling or validating a voucher.
///
/// Line numbers are 1-based positions among the user-supplied lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoucherError {
    // ========== Structural Errors ==========
    /// Voucher type is not one of BPV, BRV, CPV, CRV, JV.
    #[error("Invalid voucher type: {0}")]
    InvalidVoucherType(String),

    /// Payment/receipt voucher without a control account.
    #[error("Voucher requires a cash or bank control account")]
    MissingControlAccount,

    /// Journal voucher submitted with a control account.
    #[error("Journal vouchers do not take a control account")]
    UnexpectedControlAccount,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Header account referenced by a line.
    #[error("Account {code} is a header account and cannot receive entries")]
    NonPostableAccount {
        /// The account ID.
        account_id: AccountId,
        /// The account code.
        code: String,
    },

    /// Control account has the wrong category.
    #[error("Control account must be a {expected} account, got {actual}")]
    WrongControlCategory {
        /// Category required by the voucher kind.
        expected: AccountCategory,
        /// Category of the supplied account.
        actual: AccountCategory,
    },

    /// Journal voucher line uses a cash, bank, receivable or payable account.
    #[error("Line {line}: {category} accounts cannot be used in a journal voucher")]
    ForbiddenControlAccount {
        /// Line number.
        line: usize,
        /// Category of the offending account.
        category: AccountCategory,
    },

    /// Cash or bank account supplied as a user line.
    #[error("Line {line}: {category} accounts are posted automatically and cannot be entered")]
    SystemAccountInLine {
        /// Line number.
        line: usize,
        /// Category of the offending account.
        category: AccountCategory,
    },

    /// Account class not allowed on the user side of this voucher kind.
    #[error("Line {line}: {class} accounts cannot be used on the {side} side of this voucher")]
    ForbiddenLineCategory {
        /// Line number.
        line: usize,
        /// Class of the offending account.
        class: AccountType,
        /// The user side of the voucher.
        side: EntryType,
    },

    // ========== Line Amount Errors ==========
    /// Journal voucher has fewer than 2 lines.
    #[error("Journal voucher must have at least 2 lines, got {count}")]
    InsufficientLines {
        /// Number of lines supplied.
        count: usize,
    },

    /// Payment/receipt voucher has no user lines.
    #[error("Voucher must have at least one line besides the control account")]
    NoUserLines,

    /// A line has both debit and credit.
    #[error("Line {line}: a line must have either a debit or a credit, not both")]
    TwoSidedLine {
        /// Line number.
        line: usize,
    },

    /// A line has neither debit nor credit.
    #[error("Line {line}: a line must have a debit or a credit amount")]
    ZeroValueLine {
        /// Line number.
        line: usize,
    },

    /// A line has a negative amount.
    #[error("Line {line}: amounts cannot be negative")]
    BelowZero {
        /// Line number.
        line: usize,
    },

    /// A line carries its amount on the wrong side for the voucher direction.
    #[error("Line {line}: amount must be entered as a {expected}")]
    WrongSideAmount {
        /// Line number.
        line: usize,
        /// The side user lines must use.
        expected: EntryType,
    },

    // ========== Total Errors ==========
    /// Journal voucher totals are zero.
    #[error("Voucher total must be greater than zero")]
    ZeroTotal,

    /// Payment/receipt voucher user lines total zero.
    #[error("Voucher lines must total more than zero")]
    ZeroUserTotal,

    /// Debits and credits differ by more than the tolerance.
    #[error("Voucher is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },
}

impl VoucherError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidVoucherType(_) => "INVALID_VOUCHER_TYPE",
            Self::MissingControlAccount => "MISSING_CONTROL_ACCOUNT",
            Self::UnexpectedControlAccount => "UNEXPECTED_CONTROL_ACCOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::NonPostableAccount { .. } => "NON_POSTABLE_ACCOUNT",
            Self::WrongControlCategory { .. } => "WRONG_CONTROL_CATEGORY",
            Self::ForbiddenControlAccount { .. } => "FORBIDDEN_CONTROL_ACCOUNT",
            Self::SystemAccountInLine { .. } => "SYSTEM_ACCOUNT_IN_LINE",
            Self::ForbiddenLineCategory { .. } => "FORBIDDEN_LINE_CATEGORY",
            Self::InsufficientLines { .. } => "INSUFFICIENT_LINES",
            Self::NoUserLines => "NO_USER_LINES",
            Self::TwoSidedLine { .. } => "TWO_SIDED_LINE",
            Self::ZeroValueLine { .. } => "ZERO_VALUE_LINE",
            Self::BelowZero { .. } => "BELOW_ZERO",
            Self::WrongSideAmount { .. } => "WRONG_SIDE_AMOUNT",
            Self::ZeroTotal => "ZERO_TOTAL",
            Self::ZeroUserTotal => "ZERO_USER_TOTAL",
            Self::Unbalanced { .. } => "UNBALANCED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::AccountNotFound(_) => 404,
            _ => 400,
        }
    }
}

impl From<VoucherError> for AppError {
    fn from(err: VoucherError) -> Self {
        Self::from_status(err.http_status_code(), err.to_string())
    }
}
