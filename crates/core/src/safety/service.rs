//! Accounting safety service.

use rust_decimal::Decimal;
use tenura_shared::types::{AccountId, DealId, JournalEntryId, TOLERANCE, within_tolerance};

use crate::accounts::{Account, AccountCategory, AccountClassifier, AccountType};
use crate::deal::{Deal, DealStatus, PaymentMode};

use super::error::SafetyError;
use super::types::{InvoiceBalance, InvoiceDraft, PaymentDraft, TransactionDraft};

/// Precondition checks run before any ledger-affecting write.
///
/// Reference data (accounts, deal status, invoice balance, existing payment
/// references) is resolved by the caller and passed in through closures, so
/// every check is a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct AccountingSafetyService {
    classifier: AccountClassifier,
}

impl AccountingSafetyService {
    /// Creates a service using the given account classifier.
    #[must_use]
    pub fn new(classifier: AccountClassifier) -> Self {
        Self { classifier }
    }

    /// Checks an invoice before creation.
    ///
    /// Order: tenant, total, deal status, then the receivable and revenue
    /// accounts when given.
    pub fn validate_invoice<A, D>(
        &self,
        draft: &InvoiceDraft,
        account_lookup: A,
        deal_status: D,
    ) -> Result<(), SafetyError>
    where
        A: Fn(AccountId) -> Option<Account>,
        D: Fn(DealId) -> Option<DealStatus>,
    {
        if draft.tenant_id.is_none() {
            return Err(SafetyError::MissingTenant);
        }

        let total = draft.total();
        if draft.amount <= Decimal::ZERO || total <= Decimal::ZERO {
            return Err(SafetyError::ZeroAmount(total));
        }

        if let Some(deal_id) = draft.deal_id {
            let status = deal_status(deal_id).ok_or(SafetyError::DealNotFound(deal_id))?;
            if !status.accepts_billing() {
                return Err(SafetyError::DealNotApproved { status });
            }
        }

        if let Some(id) = draft.receivable_account {
            let account = self.resolve_invoice_account(id, &account_lookup)?;
            let category = self.classifier.classify(&account).category;
            if category != AccountCategory::Receivable {
                return Err(SafetyError::WrongDebitAccount { actual: category });
            }
        }

        if let Some(id) = draft.revenue_account {
            let account = self.resolve_invoice_account(id, &account_lookup)?;
            if self.classifier.classify(&account).class != AccountType::Income {
                return Err(SafetyError::WrongCreditAccount { code: account.code });
            }
        }

        Ok(())
    }

    /// Resolves an invoice account and rejects cash, bank and equity accounts.
    fn resolve_invoice_account<A>(
        &self,
        id: AccountId,
        account_lookup: &A,
    ) -> Result<Account, SafetyError>
    where
        A: Fn(AccountId) -> Option<Account>,
    {
        let account = account_lookup(id).ok_or(SafetyError::AccountNotFound(id))?;
        let classification = self.classifier.classify(&account);
        if classification.category.is_money() || classification.class == AccountType::Equity {
            return Err(SafetyError::ForbiddenAccountCategory { code: account.code });
        }
        Ok(account)
    }

    /// Checks a payment before it is recorded.
    ///
    /// # Arguments
    ///
    /// * `draft` - The payment
    /// * `invoice` - Balance of the linked invoice, if the payment settles one
    /// * `reference_exists` - Whether a reference is already recorded for a mode
    pub fn validate_payment<R>(
        &self,
        draft: &PaymentDraft,
        invoice: Option<&InvoiceBalance>,
        reference_exists: R,
    ) -> Result<(), SafetyError>
    where
        R: Fn(PaymentMode, &str) -> bool,
    {
        if draft.deal_id.is_none() {
            return Err(SafetyError::MissingDeal);
        }
        if draft.amount <= Decimal::ZERO {
            return Err(SafetyError::ZeroAmount(draft.amount));
        }

        if let Some(invoice) = invoice
            && !draft.kind.is_prepayment()
        {
            let remaining = invoice.remaining();
            if draft.amount - remaining > TOLERANCE {
                return Err(SafetyError::ExceedsOutstanding {
                    amount: draft.amount,
                    remaining,
                });
            }
        }

        if let Some(reference) = draft.normalized_reference()
            && reference_exists(draft.mode, reference)
        {
            return Err(SafetyError::DuplicateReference {
                mode: draft.mode,
                reference: reference.to_string(),
            });
        }

        Ok(())
    }

    /// Checks a payment recorded directly against a deal.
    ///
    /// The deal must exist and be approved or active.
    pub fn validate_deal_payment(
        &self,
        draft: &PaymentDraft,
        deal: Option<&Deal>,
    ) -> Result<(), SafetyError> {
        let deal_id = draft.deal_id.ok_or(SafetyError::MissingDeal)?;
        let deal = deal
            .filter(|d| d.id == deal_id && !d.deleted)
            .ok_or(SafetyError::DealNotFound(deal_id))?;
        if !deal.status.accepts_billing() {
            return Err(SafetyError::DealNotApproved {
                status: deal.status,
            });
        }
        if draft.amount <= Decimal::ZERO {
            return Err(SafetyError::ZeroAmount(draft.amount));
        }
        Ok(())
    }

    /// Checks a free-form transaction.
    ///
    /// Any line touching a cash, bank or income account requires lifecycle
    /// context on the transaction.
    pub fn validate_transaction<A>(
        &self,
        draft: &TransactionDraft,
        account_lookup: A,
    ) -> Result<(), SafetyError>
    where
        A: Fn(AccountId) -> Option<Account>,
    {
        if draft.lines.len() < 2 {
            return Err(SafetyError::InsufficientLines);
        }

        let mut touches_money_or_income = false;
        for line in &draft.lines {
            let account = account_lookup(line.account_id)
                .ok_or(SafetyError::AccountNotFound(line.account_id))?;
            let classification = self.classifier.classify(&account);
            if classification.category.is_money() || classification.class == AccountType::Income {
                touches_money_or_income = true;
            }
        }

        if touches_money_or_income && draft.context.is_empty() {
            return Err(SafetyError::NoLifecycleContext);
        }

        check_balanced(draft.lines.iter().map(|l| (l.debit, l.credit)))
    }
}

/// Checks that debits equal credits within the tolerance.
pub fn check_balanced<I>(lines: I) -> Result<(), SafetyError>
where
    I: IntoIterator<Item = (Decimal, Decimal)>,
{
    let (debit, credit) = lines
        .into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(d, c), (debit, credit)| {
            (d + debit, c + credit)
        });
    if within_tolerance(debit, credit) {
        Ok(())
    } else {
        Err(SafetyError::Unbalanced { debit, credit })
    }
}

/// Rejects edits to a record that already reached the ledger.
pub fn ensure_not_posted(
    record: &str,
    journal_entry: Option<JournalEntryId>,
    ledger_rows: usize,
) -> Result<(), SafetyError> {
    if journal_entry.is_some() || ledger_rows > 0 {
        return Err(SafetyError::AlreadyPosted {
            record: record.to_string(),
        });
    }
    Ok(())
}
