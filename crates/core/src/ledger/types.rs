//! Ledger row and statement types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tenura_shared::types::{AccountId, ClientId, DealerId, LedgerRowId, PropertyId};

/// The party or asset a ledger belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    /// Client ledger.
    Client(ClientId),
    /// Dealer ledger.
    Dealer(DealerId),
    /// Property ledger.
    Property(PropertyId),
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client(id) => write!(f, "client:{id}"),
            Self::Dealer(id) => write!(f, "dealer:{id}"),
            Self::Property(id) => write!(f, "property:{id}"),
        }
    }
}

/// Business operation that produced a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Payment received.
    Payment,
    /// Voucher posting.
    Voucher,
    /// Refund paid out.
    Refund,
    /// Transfer between parties.
    Transfer,
    /// Merge of duplicate records.
    Merge,
    /// Deal value booked.
    Deal,
    /// Manual journal.
    Journal,
}

/// Where a statement's rows came from, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerSourceKind {
    /// Double-entry rows written by the posting engine.
    LedgerEngine,
    /// Rows derived from deals and their payments.
    Synthetic,
    /// Rows projected from historical operation records.
    Legacy,
}

impl LedgerSourceKind {
    /// Stable name used in logs and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LedgerEngine => "ledger_engine",
            Self::Synthetic => "synthetic",
            Self::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for LedgerSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a posting, as read from a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Row ID.
    pub id: LedgerRowId,
    /// Owning entity.
    pub entity: EntityRef,
    /// Account posted to, when known.
    #[serde(default)]
    pub account_id: Option<AccountId>,
    /// Posting date.
    pub date: NaiveDate,
    /// Debit amount.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit: Decimal,
    /// Originating operation.
    pub source_type: SourceType,
    /// Narration.
    pub narration: String,
    /// Reference number (voucher number, cheque number).
    #[serde(default)]
    pub reference: Option<String>,
}

/// Caller filters applied after sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFilters {
    /// Source types to keep; empty keeps all.
    #[serde(default)]
    pub source_types: Vec<SourceType>,
    /// Inclusive start date.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Inclusive end date.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl LedgerFilters {
    /// Returns true if the row passes every filter.
    #[must_use]
    pub fn matches(&self, row: &LedgerRow) -> bool {
        (self.source_types.is_empty() || self.source_types.contains(&row.source_type))
            && self.from.is_none_or(|from| row.date >= from)
            && self.to.is_none_or(|to| row.date <= to)
    }
}

/// A statement line with its running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Line date.
    pub date: NaiveDate,
    /// Reference number.
    pub reference: Option<String>,
    /// Description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this line.
    pub running_balance: Decimal,
    /// Originating operation; `None` for the opening line.
    pub source_type: Option<SourceType>,
}

/// Statement totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
    /// Balance before the first line (always zero).
    pub opening_balance: Decimal,
    /// Balance after the last line.
    pub closing_balance: Decimal,
    /// Sum of debits on deal rows.
    pub deal_value: Decimal,
    /// Sum of credits on payment rows.
    pub received: Decimal,
    /// Running balance after the last row, zero when empty.
    pub outstanding: Decimal,
    /// True when rows came from the legacy projection.
    pub has_legacy_entries: bool,
}

/// A derived ledger statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerResponse {
    /// Entity the statement is for.
    pub entity: EntityRef,
    /// Lines, opening line first.
    pub entries: Vec<LedgerLine>,
    /// Totals.
    pub summary: LedgerSummary,
    /// Source whose rows were used; `None` when every source was empty.
    pub source: Option<LedgerSourceKind>,
    /// Sources skipped because they are not available in this deployment.
    #[serde(default)]
    pub unavailable_sources: Vec<LedgerSourceKind>,
}
