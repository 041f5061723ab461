//! Async front for the accounting safety checks.

use std::sync::Arc;

use tenura_core::safety::{
    AccountingSafetyService, InvoiceDraft, PaymentDraft, TransactionDraft, ensure_not_posted,
};
use tenura_shared::types::InvoiceId;

use crate::error::{ServiceError, StoreError};
use crate::repository::{AccountRepository, DealRepository, InvoiceRepository, PaymentRepository};

/// Loads the records each safety check reads, then runs the check.
///
/// Nothing here writes; a passing check only means the caller may go on to
/// post.
pub struct AccountingSafetyGate<A, D, I, P>
where
    A: AccountRepository,
    D: DealRepository,
    I: InvoiceRepository,
    P: PaymentRepository,
{
    safety: AccountingSafetyService,
    accounts: Arc<A>,
    deals: Arc<D>,
    invoices: Arc<I>,
    payments: Arc<P>,
}

impl<A, D, I, P> AccountingSafetyGate<A, D, I, P>
where
    A: AccountRepository,
    D: DealRepository,
    I: InvoiceRepository,
    P: PaymentRepository,
{
    /// Create a new safety gate.
    #[must_use]
    pub fn new(
        safety: AccountingSafetyService,
        accounts: Arc<A>,
        deals: Arc<D>,
        invoices: Arc<I>,
        payments: Arc<P>,
    ) -> Self {
        Self {
            safety,
            accounts,
            deals,
            invoices,
            payments,
        }
    }

    /// Checks an invoice before it is created.
    pub async fn validate_invoice(&self, draft: &InvoiceDraft) -> Result<(), ServiceError> {
        let ids: Vec<_> = [draft.receivable_account, draft.revenue_account]
            .into_iter()
            .flatten()
            .collect();
        let accounts = self.accounts.find_many(&ids).await?;
        let deal = match draft.deal_id {
            Some(id) => self.deals.find_by_id(id).await?,
            None => None,
        };

        self.safety.validate_invoice(
            draft,
            |id| accounts.get(&id).cloned(),
            |id| deal.as_ref().filter(|d| d.id == id && !d.deleted).map(|d| d.status),
        )?;
        Ok(())
    }

    /// Checks a payment before it is recorded.
    pub async fn validate_payment(&self, draft: &PaymentDraft) -> Result<(), ServiceError> {
        let invoice = match draft.invoice_id {
            Some(id) => Some(
                self.invoices
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| StoreError::NotFound {
                        entity: "Invoice",
                        id: id.to_string(),
                    })?,
            ),
            None => None,
        };
        let duplicate = match draft.normalized_reference() {
            Some(reference) => self.payments.reference_exists(draft.mode, reference).await?,
            None => false,
        };

        self.safety
            .validate_payment(draft, invoice.as_ref(), |_, _| duplicate)?;
        Ok(())
    }

    /// Checks a payment against its deal's lifecycle.
    pub async fn validate_deal_payment(&self, draft: &PaymentDraft) -> Result<(), ServiceError> {
        let deal = match draft.deal_id {
            Some(id) => self.deals.find_by_id(id).await?,
            None => None,
        };
        self.safety.validate_deal_payment(draft, deal.as_ref())?;
        Ok(())
    }

    /// Checks a free-form transaction.
    pub async fn validate_transaction(&self, draft: &TransactionDraft) -> Result<(), ServiceError> {
        let ids: Vec<_> = draft.lines.iter().map(|l| l.account_id).collect();
        let accounts = self.accounts.find_many(&ids).await?;
        self.safety
            .validate_transaction(draft, |id| accounts.get(&id).cloned())?;
        Ok(())
    }

    /// Refuses edits to an invoice that already reached the ledger.
    pub async fn ensure_invoice_editable(&self, id: InvoiceId) -> Result<(), ServiceError> {
        let invoice = self
            .invoices
            .find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                entity: "Invoice",
                id: id.to_string(),
            })?;
        let rows = self.invoices.ledger_row_count(id).await?;

        if let Err(e) = ensure_not_posted(&invoice.number, invoice.journal_entry, rows) {
            tracing::warn!(invoice = %id, ledger_rows = rows, "Edit refused on posted invoice");
            return Err(e.into());
        }
        Ok(())
    }
}
