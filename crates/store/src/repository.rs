//! Repository ports.
//!
//! Services are generic over these traits; [`crate::MemoryStore`] implements
//! all of them. Every method that writes more than one record is atomic: it
//! either applies everything or nothing.

use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tenura_core::accounts::Account;
use tenura_core::deal::{Deal, DealPayment, PaymentMode};
use tenura_core::ledger::{EntityRef, LedgerRow, LedgerSourceKind};
use tenura_core::payment_plan::{AllocationOutcome, PaymentPlan};
use tenura_core::posting::JournalDraft;
use tenura_core::safety::InvoiceBalance;
use tenura_shared::types::{AccountId, DealId, InvoiceId, JournalEntryId};

use crate::error::{SourceError, StoreError};

/// Chart of accounts lookups.
pub trait AccountRepository: Send + Sync {
    /// Find an account by ID.
    fn find_by_id(
        &self,
        id: AccountId,
    ) -> impl Future<Output = Result<Option<Account>, StoreError>> + Send;

    /// Find an account by code (used to resolve system accounts by convention).
    fn find_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Account>, StoreError>> + Send;

    /// Find several accounts at once; unknown IDs are absent from the map.
    fn find_many(
        &self,
        ids: &[AccountId],
    ) -> impl Future<Output = Result<HashMap<AccountId, Account>, StoreError>> + Send;
}

/// Deal lookups.
pub trait DealRepository: Send + Sync {
    /// Find a deal by ID, payments included.
    fn find_by_id(&self, id: DealId)
    -> impl Future<Output = Result<Option<Deal>, StoreError>> + Send;

    /// All deals an entity takes part in, ordered by deal date.
    fn list_for_entity(
        &self,
        entity: EntityRef,
    ) -> impl Future<Output = Result<Vec<Deal>, StoreError>> + Send;
}

/// Invoice lookups.
pub trait InvoiceRepository: Send + Sync {
    /// Find an invoice's balance by ID.
    fn find_by_id(
        &self,
        id: InvoiceId,
    ) -> impl Future<Output = Result<Option<InvoiceBalance>, StoreError>> + Send;

    /// Number of ledger rows written for an invoice.
    fn ledger_row_count(
        &self,
        id: InvoiceId,
    ) -> impl Future<Output = Result<usize, StoreError>> + Send;
}

/// Payment reference lookups.
pub trait PaymentRepository: Send + Sync {
    /// Returns true if `reference` is already recorded for `mode`.
    fn reference_exists(
        &self,
        mode: PaymentMode,
        reference: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// A journal entry as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedJournal {
    /// Journal entry ID.
    pub id: JournalEntryId,
    /// Posted lines and header.
    pub draft: JournalDraft,
    /// Entry that reversed this one, if any.
    pub reversed_by: Option<JournalEntryId>,
    /// Entry this one reverses, if any.
    pub reverses: Option<JournalEntryId>,
}

/// Journal writes.
pub trait JournalRepository: Send + Sync {
    /// Writes a draft and its entity ledger rows atomically.
    fn post(
        &self,
        draft: JournalDraft,
    ) -> impl Future<Output = Result<JournalEntryId, StoreError>> + Send;

    /// Find a posted journal.
    fn find(
        &self,
        id: JournalEntryId,
    ) -> impl Future<Output = Result<Option<PostedJournal>, StoreError>> + Send;

    /// Writes a reversal and links it to `original` atomically.
    ///
    /// Fails with a conflict if `original` is already reversed.
    fn post_reversal(
        &self,
        original: JournalEntryId,
        reversal: JournalDraft,
    ) -> impl Future<Output = Result<JournalEntryId, StoreError>> + Send;
}

/// Everything one allocation writes.
#[derive(Debug, Clone)]
pub struct AllocationCommit {
    /// Deal paid against.
    pub deal_id: DealId,
    /// Computed allocation.
    pub outcome: AllocationOutcome,
    /// One debit cash/bank, credit receivable pair per slice.
    pub journals: Vec<JournalDraft>,
    /// Payment recorded on the deal (applied amount only).
    pub payment: DealPayment,
    /// Date statuses are derived against.
    pub today: NaiveDate,
}

/// What an allocation commit wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationReceipt {
    /// Journal entries written, in slice order.
    pub journal_entries: Vec<JournalEntryId>,
    /// True if this commit moved the deal to closed-won.
    pub deal_completed: bool,
}

/// Payment plan storage.
pub trait PaymentPlanRepository: Send + Sync {
    /// Find the plan of a deal.
    fn find_by_deal(
        &self,
        deal_id: DealId,
    ) -> impl Future<Output = Result<Option<PaymentPlan>, StoreError>> + Send;

    /// Stores a new plan together with the journals that bring the deal
    /// into the ledger, atomically. A deal has at most one plan.
    fn save_plan(
        &self,
        plan: PaymentPlan,
        bookings: Vec<JournalDraft>,
    ) -> impl Future<Output = Result<Vec<JournalEntryId>, StoreError>> + Send;

    /// Applies an allocation atomically.
    ///
    /// Installment updates, journal entries, the deal payment, and deal
    /// completion are written together. Implementations re-check the outcome
    /// against current state and write nothing if it is stale, would
    /// overpay an installment, or reuses a recorded payment reference. The
    /// deal moves to closed-won at most once.
    fn commit_allocation(
        &self,
        commit: AllocationCommit,
    ) -> impl Future<Output = Result<AllocationReceipt, StoreError>> + Send;
}

/// A prioritized source of ledger rows.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Which source this is.
    fn kind(&self) -> LedgerSourceKind;

    /// Stable name for logs.
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// All rows for an entity, in source order.
    async fn fetch(&self, entity: EntityRef) -> Result<Vec<LedgerRow>, SourceError>;
}
