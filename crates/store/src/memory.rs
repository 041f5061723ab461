//! In-memory backend.
//!
//! All state sits behind one `tokio::sync::RwLock`. Every mutation takes the
//! write lock once and validates before touching anything, so a failed write
//! leaves no trace.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tenura_core::accounts::Account;
use tenura_core::deal::{Deal, DealStatus, PaymentMode};
use tenura_core::ledger::{EntityRef, LedgerRow, LedgerSourceKind};
use tenura_core::payment_plan::{PaymentPlan, completes_deal};
use tenura_core::posting::JournalDraft;
use tenura_core::safety::{InvoiceBalance, SafetyError};
use tenura_shared::types::{AccountId, DealId, InvoiceId, JournalEntryId};
use tokio::sync::RwLock;

use crate::error::{SourceError, StoreError};
use crate::repository::{
    AccountRepository, AllocationCommit, AllocationReceipt, DealRepository, InvoiceRepository,
    JournalRepository, LedgerSource, PaymentPlanRepository, PaymentRepository, PostedJournal,
};
use crate::services::unified_ledger::DealLedgerSource;
use crate::snapshot::{InvoiceRecord, StoreSnapshot};

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    deals: HashMap<DealId, Deal>,
    invoices: HashMap<InvoiceId, InvoiceRecord>,
    payment_refs: HashSet<(PaymentMode, String)>,
    plans: HashMap<DealId, PaymentPlan>,
    journals: HashMap<JournalEntryId, PostedJournal>,
    ledger_rows: Vec<LedgerRow>,
    legacy_rows: Vec<LedgerRow>,
    unavailable: HashSet<LedgerSourceKind>,
}

impl State {
    fn record_payment_ref(&mut self, mode: PaymentMode, reference: Option<&str>) {
        if let Some(reference) = reference.map(str::trim).filter(|r| !r.is_empty()) {
            self.payment_refs.insert((mode, reference.to_string()));
        }
    }

    fn recorded_payment_ref(&self, mode: PaymentMode, reference: Option<&str>) -> Option<String> {
        let reference = reference.map(str::trim).filter(|r| !r.is_empty())?;
        self.payment_refs
            .contains(&(mode, reference.to_string()))
            .then(|| reference.to_string())
    }

    fn insert_journal(&mut self, draft: JournalDraft, reverses: Option<JournalEntryId>) -> JournalEntryId {
        let id = JournalEntryId::new();
        self.ledger_rows.extend(draft.ledger_rows());
        self.journals.insert(
            id,
            PostedJournal {
                id,
                draft,
                reversed_by: None,
                reverses,
            },
        );
        id
    }
}

/// In-memory implementation of every repository port.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a snapshot's records.
    #[must_use]
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut state = State {
            accounts: snapshot.accounts.into_iter().map(|a| (a.id, a)).collect(),
            invoices: snapshot
                .invoices
                .into_iter()
                .map(|i| (i.balance.id, i))
                .collect(),
            plans: snapshot.plans.into_iter().map(|p| (p.deal_id, p)).collect(),
            ledger_rows: snapshot.ledger_rows,
            legacy_rows: snapshot.legacy_rows,
            unavailable: snapshot.unavailable_sources.into_iter().collect(),
            ..State::default()
        };
        for deal in snapshot.deals {
            for payment in deal.live_payments() {
                state.record_payment_ref(payment.mode, payment.reference.as_deref());
            }
            state.deals.insert(deal.id, deal);
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Adds or replaces an account.
    pub async fn insert_account(&self, account: Account) {
        self.state.write().await.accounts.insert(account.id, account);
    }

    /// Adds or replaces a deal.
    pub async fn insert_deal(&self, deal: Deal) {
        let mut state = self.state.write().await;
        for payment in deal.live_payments() {
            state.record_payment_ref(payment.mode, payment.reference.as_deref());
        }
        state.deals.insert(deal.id, deal);
    }

    /// Adds or replaces an invoice.
    pub async fn insert_invoice(&self, balance: InvoiceBalance, ledger_rows: usize) {
        self.state.write().await.invoices.insert(
            balance.id,
            InvoiceRecord {
                balance,
                ledger_rows,
            },
        );
    }

    /// Appends a row to the ledger-engine table.
    pub async fn insert_ledger_row(&self, row: LedgerRow) {
        self.state.write().await.ledger_rows.push(row);
    }

    /// Appends a row to the legacy projection.
    pub async fn insert_legacy_row(&self, row: LedgerRow) {
        self.state.write().await.legacy_rows.push(row);
    }

    /// Marks a ledger source as absent from this deployment.
    pub async fn mark_unavailable(&self, kind: LedgerSourceKind) {
        self.state.write().await.unavailable.insert(kind);
    }

    /// Every posted journal entry.
    pub async fn journals(&self) -> Vec<PostedJournal> {
        self.state.read().await.journals.values().cloned().collect()
    }

    /// The backend's ledger sources in priority order.
    pub fn ledger_sources(self: &Arc<Self>) -> Vec<Arc<dyn LedgerSource>> {
        vec![
            Arc::new(TableLedgerSource {
                store: Arc::clone(self),
                kind: LedgerSourceKind::LedgerEngine,
            }),
            Arc::new(DealLedgerSource::new(Arc::clone(self))),
            Arc::new(TableLedgerSource {
                store: Arc::clone(self),
                kind: LedgerSourceKind::Legacy,
            }),
        ]
    }
}

impl AccountRepository for MemoryStore {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.code == code)
            .cloned())
    }

    async fn find_many(&self, ids: &[AccountId]) -> Result<HashMap<AccountId, Account>, StoreError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.accounts.get(id).map(|a| (*id, a.clone())))
            .collect())
    }
}

impl DealRepository for MemoryStore {
    async fn find_by_id(&self, id: DealId) -> Result<Option<Deal>, StoreError> {
        Ok(self.state.read().await.deals.get(&id).cloned())
    }

    async fn list_for_entity(&self, entity: EntityRef) -> Result<Vec<Deal>, StoreError> {
        let state = self.state.read().await;
        let mut deals: Vec<Deal> = state
            .deals
            .values()
            .filter(|d| match entity {
                EntityRef::Client(id) => d.client_id == id,
                EntityRef::Dealer(id) => d.dealer_id == Some(id),
                EntityRef::Property(id) => d.property_id == Some(id),
            })
            .cloned()
            .collect();
        deals.sort_by(|a, b| a.deal_date.cmp(&b.deal_date).then_with(|| a.code.cmp(&b.code)));
        Ok(deals)
    }
}

impl InvoiceRepository for MemoryStore {
    async fn find_by_id(&self, id: InvoiceId) -> Result<Option<InvoiceBalance>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .invoices
            .get(&id)
            .map(|r| r.balance.clone()))
    }

    async fn ledger_row_count(&self, id: InvoiceId) -> Result<usize, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .invoices
            .get(&id)
            .map_or(0, |r| r.ledger_rows))
    }
}

impl PaymentRepository for MemoryStore {
    async fn reference_exists(&self, mode: PaymentMode, reference: &str) -> Result<bool, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .payment_refs
            .contains(&(mode, reference.trim().to_string())))
    }
}

impl JournalRepository for MemoryStore {
    async fn post(&self, draft: JournalDraft) -> Result<JournalEntryId, StoreError> {
        if !draft.is_balanced() {
            let (debit, credit) = draft.totals();
            return Err(StoreError::Conflict(format!(
                "refusing unbalanced journal: debit={debit}, credit={credit}"
            )));
        }
        Ok(self.state.write().await.insert_journal(draft, None))
    }

    async fn find(&self, id: JournalEntryId) -> Result<Option<PostedJournal>, StoreError> {
        Ok(self.state.read().await.journals.get(&id).cloned())
    }

    async fn post_reversal(
        &self,
        original: JournalEntryId,
        reversal: JournalDraft,
    ) -> Result<JournalEntryId, StoreError> {
        let mut state = self.state.write().await;
        let posted = state.journals.get(&original).ok_or_else(|| StoreError::NotFound {
            entity: "Journal entry",
            id: original.to_string(),
        })?;
        if let Some(existing) = posted.reversed_by {
            return Err(StoreError::Conflict(format!(
                "journal entry {original} already reversed by {existing}"
            )));
        }

        let id = state.insert_journal(reversal, Some(original));
        if let Some(posted) = state.journals.get_mut(&original) {
            posted.reversed_by = Some(id);
        }
        Ok(id)
    }
}

impl PaymentPlanRepository for MemoryStore {
    async fn find_by_deal(&self, deal_id: DealId) -> Result<Option<PaymentPlan>, StoreError> {
        Ok(self.state.read().await.plans.get(&deal_id).cloned())
    }

    async fn save_plan(
        &self,
        plan: PaymentPlan,
        bookings: Vec<JournalDraft>,
    ) -> Result<Vec<JournalEntryId>, StoreError> {
        let mut state = self.state.write().await;
        if state.plans.contains_key(&plan.deal_id) {
            return Err(StoreError::Conflict(format!(
                "deal {} already has a payment plan",
                plan.deal_id
            )));
        }
        if let Some(unbalanced) = bookings.iter().find(|j| !j.is_balanced()) {
            return Err(StoreError::Conflict(format!(
                "refusing unbalanced journal: {}",
                unbalanced.narration
            )));
        }

        let entries = bookings
            .into_iter()
            .map(|draft| state.insert_journal(draft, None))
            .collect();
        state.plans.insert(plan.deal_id, plan);
        Ok(entries)
    }

    async fn commit_allocation(
        &self,
        commit: AllocationCommit,
    ) -> Result<AllocationReceipt, StoreError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let deal = state
            .deals
            .get(&commit.deal_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Deal",
                id: commit.deal_id.to_string(),
            })?;
        let plan = state
            .plans
            .get(&commit.deal_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Payment plan",
                id: commit.deal_id.to_string(),
            })?;
        if plan.id != commit.outcome.plan_id {
            return Err(StoreError::Conflict(format!(
                "allocation targets plan {} but deal {} has plan {}",
                commit.outcome.plan_id, commit.deal_id, plan.id
            )));
        }
        if let Some(unbalanced) = commit.journals.iter().find(|j| !j.is_balanced()) {
            return Err(StoreError::Conflict(format!(
                "refusing unbalanced journal: {}",
                unbalanced.narration
            )));
        }

        if let Some(reference) =
            state.recorded_payment_ref(commit.payment.mode, commit.payment.reference.as_deref())
        {
            return Err(SafetyError::DuplicateReference {
                mode: commit.payment.mode,
                reference,
            }
            .into());
        }

        let mut updated = plan.clone();
        updated.apply_allocation(&commit.outcome, commit.today)?;
        let deal_completed = completes_deal(deal.deal_amount, deal.status, updated.total_paid());

        // Checks passed; apply everything.
        let journal_entries = commit
            .journals
            .into_iter()
            .map(|draft| state.insert_journal(draft, None))
            .collect();
        state.plans.insert(commit.deal_id, updated);
        state.record_payment_ref(commit.payment.mode, commit.payment.reference.as_deref());
        if let Some(deal) = state.deals.get_mut(&commit.deal_id) {
            deal.payments.push(commit.payment);
            if deal_completed {
                deal.status = DealStatus::ClosedWon;
            }
        }

        Ok(AllocationReceipt {
            journal_entries,
            deal_completed,
        })
    }
}

/// Ledger-engine or legacy rows held by the in-memory backend.
struct TableLedgerSource {
    store: Arc<MemoryStore>,
    kind: LedgerSourceKind,
}

#[async_trait]
impl LedgerSource for TableLedgerSource {
    fn kind(&self) -> LedgerSourceKind {
        self.kind
    }

    async fn fetch(&self, entity: EntityRef) -> Result<Vec<LedgerRow>, SourceError> {
        let state = self.store.state.read().await;
        if state.unavailable.contains(&self.kind) {
            return Err(SourceError::Unavailable {
                source_kind: self.kind,
                reason: "table not present".to_string(),
            });
        }
        let rows = match self.kind {
            LedgerSourceKind::Legacy => &state.legacy_rows,
            _ => &state.ledger_rows,
        };
        Ok(rows.iter().filter(|r| r.entity == entity).cloned().collect())
    }
}
