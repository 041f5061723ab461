//! Payment plan creation and installment allocation.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tenura_core::accounts::{Account, AccountClassifier, ClassifierRules};
use tenura_core::deal::{Deal, DealPayment, DealStatus, PaymentMode};
use tenura_core::ledger::EntityRef;
use tenura_core::payment_plan::{AllocationOutcome, PaymentPlan, PlanRequest, allocate, generate_schedule};
use tenura_core::posting::JournalDraft;
use tenura_core::safety::{AccountingSafetyService, PaymentDraft, PaymentKind, SafetyError};
use tenura_shared::config::AccountingConfig;
use tenura_shared::types::{AccountId, DealId, JournalEntryId, PaymentId};

use crate::error::ServiceError;
use crate::repository::{
    AccountRepository, AllocationCommit, DealRepository, PaymentPlanRepository, PaymentRepository,
};

/// A payment received against a deal's plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Deal paid against.
    pub deal_id: DealId,
    /// Amount received.
    pub amount: Decimal,
    /// Payment mode.
    pub mode: PaymentMode,
    /// Cash or bank account the money went into.
    pub deposit_account: AccountId,
    /// Cheque or transfer reference.
    #[serde(default)]
    pub reference: Option<String>,
    /// Date received.
    pub date: NaiveDate,
}

impl PaymentReceipt {
    fn draft(&self) -> PaymentDraft {
        PaymentDraft {
            deal_id: Some(self.deal_id),
            invoice_id: None,
            installment_id: None,
            amount: self.amount,
            mode: self.mode,
            kind: PaymentKind::Regular,
            reference: self.reference.clone(),
            date: self.date,
        }
    }
}

/// What [`InstallmentService::allocate_payment`] did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptOutcome {
    /// How the payment spread over the installments.
    pub allocation: AllocationOutcome,
    /// Journal entries written, one per slice.
    pub journal_entries: Vec<JournalEntryId>,
    /// True if this payment closed the deal.
    pub deal_completed: bool,
}

/// System account codes the service posts to.
#[derive(Debug, Clone)]
struct SystemAccounts {
    receivable: String,
    revenue: String,
    undeposited: String,
}

/// Creates payment plans and applies payments to them.
pub struct InstallmentService<P, D, A, R>
where
    P: PaymentPlanRepository,
    D: DealRepository,
    A: AccountRepository,
    R: PaymentRepository,
{
    classifier: AccountClassifier,
    safety: AccountingSafetyService,
    codes: SystemAccounts,
    plans: Arc<P>,
    deals: Arc<D>,
    accounts: Arc<A>,
    payments: Arc<R>,
}

impl<P, D, A, R> InstallmentService<P, D, A, R>
where
    P: PaymentPlanRepository,
    D: DealRepository,
    A: AccountRepository,
    R: PaymentRepository,
{
    /// Create a new installment service.
    #[must_use]
    pub fn new(
        config: &AccountingConfig,
        plans: Arc<P>,
        deals: Arc<D>,
        accounts: Arc<A>,
        payments: Arc<R>,
    ) -> Self {
        let classifier = AccountClassifier::new(ClassifierRules::from_config(config));
        Self {
            safety: AccountingSafetyService::new(classifier.clone()),
            classifier,
            codes: SystemAccounts {
                receivable: config.receivable_account_code.clone(),
                revenue: config.deal_revenue_account_code.clone(),
                undeposited: config.undeposited_funds_account_code.clone(),
            },
            plans,
            deals,
            accounts,
            payments,
        }
    }

    async fn load_deal(&self, id: DealId) -> Result<Deal, ServiceError> {
        self.deals
            .find_by_id(id)
            .await?
            .filter(|d| !d.deleted)
            .ok_or(ServiceError::DealNotFound(id))
    }

    async fn system_account(&self, role: &'static str, code: &str) -> Result<Account, ServiceError> {
        self.accounts
            .find_by_code(code)
            .await?
            .ok_or_else(|| ServiceError::SystemAccountMissing {
                role,
                code: code.to_string(),
            })
    }

    /// Generates and stores the schedule for a deal.
    ///
    /// The deal's value and any payments already recorded on it are posted
    /// to the ledger in the same write as the plan, so the client's posted
    /// ledger carries the full history from then on. Earlier payments are
    /// deposited to the undeposited funds account.
    ///
    /// # Errors
    ///
    /// Returns `DealNotFound`, `DealNotApproved` for a deal that cannot be
    /// billed, any schedule error, `SystemAccountMissing`, or a conflict if
    /// the deal already has a plan.
    pub async fn create_plan(
        &self,
        request: PlanRequest,
        today: NaiveDate,
    ) -> Result<PaymentPlan, ServiceError> {
        let deal = self.load_deal(request.deal_id).await?;
        if !deal.status.accepts_billing() {
            return Err(SafetyError::DealNotApproved {
                status: deal.status,
            }
            .into());
        }

        let plan = generate_schedule(&request, today)?;

        let receivable = self.system_account("Receivable", &self.codes.receivable).await?;
        let revenue = self.system_account("Revenue", &self.codes.revenue).await?;
        let bookings = if deal.live_payments().next().is_some() {
            let holding = self
                .system_account("Undeposited funds", &self.codes.undeposited)
                .await?;
            JournalDraft::deal_history(&deal, receivable.id, revenue.id, holding.id)
        } else {
            vec![JournalDraft::deal_booking(&deal, receivable.id, revenue.id)]
        };

        let entries = self.plans.save_plan(plan.clone(), bookings).await?;

        tracing::info!(
            deal = %deal.id,
            plan = %plan.id,
            installments = plan.installments.len(),
            total = %plan.total_amount,
            journal_entries = entries.len(),
            "Payment plan created"
        );
        Ok(plan)
    }

    /// Applies a payment to the deal's installments, oldest first.
    ///
    /// The payment passes the deal-payment and payment safety checks first.
    /// A closed-won deal still accepts the call; with nothing outstanding the
    /// whole amount is excess and nothing is written.
    ///
    /// Each slice becomes one debit deposit / credit receivable journal entry
    /// tagged to the deal's client. Installments, journals, the deal payment
    /// and deal completion are committed together. Excess beyond the plan's
    /// outstanding total is reported and not recorded.
    ///
    /// # Errors
    ///
    /// Returns `DealNotFound`, a safety error (`DealNotApproved`,
    /// `ZeroAmount`, `DuplicateReference`), `PlanNotFound`,
    /// `InvalidDepositAccount`, `SystemAccountMissing`, or a conflict if a
    /// concurrent payment changed the plan first.
    pub async fn allocate_payment(
        &self,
        receipt: PaymentReceipt,
        today: NaiveDate,
    ) -> Result<ReceiptOutcome, ServiceError> {
        let deal = self.load_deal(receipt.deal_id).await?;

        let draft = receipt.draft();
        if deal.status != DealStatus::ClosedWon {
            self.safety.validate_deal_payment(&draft, Some(&deal))?;
        }
        let duplicate = match draft.normalized_reference() {
            Some(reference) => self.payments.reference_exists(draft.mode, reference).await?,
            None => false,
        };
        self.safety.validate_payment(&draft, None, |_, _| duplicate)?;

        let plan = self
            .plans
            .find_by_deal(deal.id)
            .await?
            .ok_or(ServiceError::PlanNotFound(deal.id))?;

        let deposit = self
            .accounts
            .find_by_id(receipt.deposit_account)
            .await?
            .filter(|a| self.classifier.classify(a).category.is_money())
            .ok_or(ServiceError::InvalidDepositAccount(receipt.deposit_account))?;
        let receivable = self.system_account("Receivable", &self.codes.receivable).await?;

        let allocation = allocate(&plan, receipt.amount, today)?;
        if allocation.is_empty() {
            tracing::info!(
                deal = %deal.id,
                excess = %allocation.excess,
                "Nothing outstanding, payment not applied"
            );
            return Ok(ReceiptOutcome {
                allocation,
                journal_entries: Vec::new(),
                deal_completed: false,
            });
        }

        let journals = allocation
            .slices
            .iter()
            .map(|slice| {
                JournalDraft::payment_pair(
                    receipt.date,
                    deposit.id,
                    receivable.id,
                    slice.applied,
                    EntityRef::Client(deal.client_id),
                    format!("Installment #{} payment for {}", slice.number, deal.code),
                    receipt.reference.clone(),
                )
            })
            .collect();
        let payment = DealPayment {
            id: PaymentId::new(),
            amount: allocation.applied,
            date: receipt.date,
            mode: receipt.mode,
            reference: receipt.reference,
            deleted: false,
        };

        let committed = self
            .plans
            .commit_allocation(AllocationCommit {
                deal_id: deal.id,
                outcome: allocation.clone(),
                journals,
                payment,
                today,
            })
            .await?;

        tracing::info!(
            deal = %deal.id,
            applied = %allocation.applied,
            excess = %allocation.excess,
            slices = allocation.slices.len(),
            "Allocation committed"
        );
        if committed.deal_completed {
            tracing::info!(deal = %deal.id, code = %deal.code, "Deal auto-completed");
        }

        Ok(ReceiptOutcome {
            allocation,
            journal_entries: committed.journal_entries,
            deal_completed: committed.deal_completed,
        })
    }
}
