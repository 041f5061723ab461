//! Voucher domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tenura_shared::types::AccountId;

use super::error::VoucherError;

/// Entry side: either Debit or Credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

impl EntryType {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

/// The five supported voucher kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoucherType {
    /// Bank payment voucher.
    Bpv,
    /// Bank receipt voucher.
    Brv,
    /// Cash payment voucher.
    Cpv,
    /// Cash receipt voucher.
    Crv,
    /// Journal voucher.
    Jv,
}

impl VoucherType {
    /// Returns true if the voucher carries an implicit control-account line.
    #[must_use]
    pub fn has_control_account(self) -> bool {
        self.rule().control.is_some()
    }
}

impl std::fmt::Display for VoucherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bpv => write!(f, "BPV"),
            Self::Brv => write!(f, "BRV"),
            Self::Cpv => write!(f, "CPV"),
            Self::Crv => write!(f, "CRV"),
            Self::Jv => write!(f, "JV"),
        }
    }
}

impl std::str::FromStr for VoucherType {
    type Err = VoucherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BPV" => Ok(Self::Bpv),
            "BRV" => Ok(Self::Brv),
            "CPV" => Ok(Self::Cpv),
            "CRV" => Ok(Self::Crv),
            "JV" => Ok(Self::Jv),
            _ => Err(VoucherError::InvalidVoucherType(s.to_string())),
        }
    }
}

/// A user-supplied voucher line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherLineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Debit amount (0 if credit).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (0 if debit).
    #[serde(default)]
    pub credit: Decimal,
    /// Optional line description.
    #[serde(default)]
    pub description: Option<String>,
}

impl VoucherLineInput {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
        }
    }
}

/// Raw voucher submission as received from a caller.
///
/// The voucher type is still a string here; [`super::VoucherBuilder::from_payload`]
/// parses it and rejects unknown kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherPayload {
    /// Voucher kind (`BPV`, `BRV`, `CPV`, `CRV`, `JV`).
    pub voucher_type: String,
    /// Voucher date.
    pub date: NaiveDate,
    /// The single cash or bank account for payment/receipt vouchers.
    #[serde(default)]
    pub control_account: Option<AccountId>,
    /// User lines (never includes the control line).
    pub lines: Vec<VoucherLineInput>,
    /// Optional document reference (cheque number, receipt number).
    #[serde(default)]
    pub reference: Option<String>,
    /// Optional narration.
    #[serde(default)]
    pub narration: Option<String>,
}

/// Where a voucher line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineOrigin {
    /// Supplied by the caller.
    User,
    /// Synthesized for the control account.
    Control,
}

/// A voucher line after assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherLine {
    /// The account to post to.
    pub account_id: AccountId,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Optional line description.
    pub description: Option<String>,
    /// Whether the line is user-supplied or the synthesized control line.
    pub origin: LineOrigin,
}

impl VoucherLine {
    /// Returns the amount on the given side.
    #[must_use]
    pub fn amount_on(&self, side: EntryType) -> Decimal {
        match side {
            EntryType::Debit => self.debit,
            EntryType::Credit => self.credit,
        }
    }
}

/// An assembled voucher, ready for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    /// Voucher kind.
    pub voucher_type: VoucherType,
    /// Voucher date.
    pub date: NaiveDate,
    /// Control account for payment/receipt vouchers.
    pub control_account: Option<AccountId>,
    /// All lines, user lines first, then at most one control line.
    pub lines: Vec<VoucherLine>,
    /// Optional document reference.
    pub reference: Option<String>,
    /// Optional narration.
    pub narration: Option<String>,
}

impl Voucher {
    /// Iterates over the user-supplied lines.
    pub fn user_lines(&self) -> impl Iterator<Item = &VoucherLine> {
        self.lines.iter().filter(|l| l.origin == LineOrigin::User)
    }

    /// Returns the synthesized control line, if any.
    #[must_use]
    pub fn control_line(&self) -> Option<&VoucherLine> {
        self.lines.iter().find(|l| l.origin == LineOrigin::Control)
    }

    /// Returns (total debit, total credit) over all lines.
    #[must_use]
    pub fn totals(&self) -> (Decimal, Decimal) {
        let debit: Decimal = self.lines.iter().map(|l| l.debit).sum();
        let credit: Decimal = self.lines.iter().map(|l| l.credit).sum();
        (debit, credit)
    }
}
