//! Voucher posting and journal reversal.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tenura_core::posting::{JournalDraft, reverse};
use tenura_core::voucher::{Voucher, VoucherBuilder, VoucherPayload, VoucherValidationEngine};
use tenura_shared::types::{JournalEntryId, VoucherId};

use crate::error::{ServiceError, StoreError};
use crate::repository::{AccountRepository, JournalRepository};

/// A voucher that was validated and written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostedVoucher {
    /// Voucher ID.
    pub id: VoucherId,
    /// Journal entry holding the voucher lines.
    pub journal_entry: JournalEntryId,
    /// The voucher as assembled, control line included.
    pub voucher: Voucher,
}

/// Builds, validates and posts vouchers.
pub struct VoucherPostingService<A: AccountRepository, J: JournalRepository> {
    engine: VoucherValidationEngine,
    accounts: Arc<A>,
    journals: Arc<J>,
}

impl<A: AccountRepository, J: JournalRepository> VoucherPostingService<A, J> {
    /// Create a new voucher posting service.
    #[must_use]
    pub fn new(engine: VoucherValidationEngine, accounts: Arc<A>, journals: Arc<J>) -> Self {
        Self {
            engine,
            accounts,
            journals,
        }
    }

    /// Assembles a voucher from `payload`, validates it, and posts it.
    ///
    /// The control line is synthesized by the builder. Nothing is written
    /// unless validation passes.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Voucher` for any rule violation and
    /// `ServiceError::Store` if the write fails.
    pub async fn post(&self, payload: VoucherPayload) -> Result<PostedVoucher, ServiceError> {
        let voucher = VoucherBuilder::from_payload(payload)?.build()?;

        let ids: Vec<_> = voucher.lines.iter().map(|l| l.account_id).collect();
        let accounts = self.accounts.find_many(&ids).await?;
        self.engine
            .validate(&voucher, |id| accounts.get(&id).cloned())?;

        let journal_entry = self.journals.post(JournalDraft::from_voucher(&voucher)).await?;

        let id = VoucherId::new();
        tracing::info!(
            voucher = %id,
            journal_entry = %journal_entry,
            voucher_type = %voucher.voucher_type,
            lines = voucher.lines.len(),
            "Voucher posted"
        );

        Ok(PostedVoucher {
            id,
            journal_entry,
            voucher,
        })
    }

    /// Posts the mirror image of a journal entry.
    ///
    /// # Errors
    ///
    /// Returns `JournalNotFound` for an unknown entry and `AlreadyReversed`
    /// if the entry already has a reversal.
    pub async fn reverse(
        &self,
        journal_entry: JournalEntryId,
        date: NaiveDate,
        reason: &str,
    ) -> Result<JournalEntryId, ServiceError> {
        let original = self
            .journals
            .find(journal_entry)
            .await?
            .ok_or(ServiceError::JournalNotFound(journal_entry))?;
        if original.reversed_by.is_some() {
            return Err(ServiceError::AlreadyReversed(journal_entry));
        }

        let reversal = reverse(&original.draft, date, reason);
        let id = match self.journals.post_reversal(journal_entry, reversal).await {
            Ok(id) => id,
            // Lost a race with another reversal.
            Err(StoreError::Conflict(_)) => {
                return Err(ServiceError::AlreadyReversed(journal_entry));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            original = %journal_entry,
            reversal = %id,
            reason,
            "Journal entry reversed"
        );
        Ok(id)
    }
}
