//! Voucher posting and reversal against the in-memory backend.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tenura_core::voucher::{VoucherError, VoucherLineInput, VoucherPayload, VoucherValidationEngine};
use tenura_shared::types::{AccountId, JournalEntryId};
use tenura_store::ServiceError;
use tenura_store::repository::JournalRepository;
use tenura_store::services::VoucherPostingService;

use common::{date, seeded_store};

fn payload(
    voucher_type: &str,
    control: Option<AccountId>,
    lines: Vec<VoucherLineInput>,
) -> VoucherPayload {
    VoucherPayload {
        voucher_type: voucher_type.to_string(),
        date: date(2025, 3, 1),
        control_account: control,
        lines,
        reference: Some("CHQ-1001".to_string()),
        narration: None,
    }
}

#[tokio::test]
async fn test_bpv_posts_balanced_journal() {
    let (store, chart) = seeded_store().await;
    let service = VoucherPostingService::new(
        VoucherValidationEngine::default(),
        store.clone(),
        store.clone(),
    );

    let posted = service
        .post(payload(
            "BPV",
            Some(chart.bank.id),
            vec![VoucherLineInput::debit(chart.expense.id, dec!(5000))],
        ))
        .await
        .unwrap();

    assert_eq!(posted.voucher.lines.len(), 2);
    let journal = store.find(posted.journal_entry).await.unwrap().unwrap();
    assert!(journal.draft.is_balanced());
    assert_eq!(journal.draft.totals(), (dec!(5000), dec!(5000)));
    assert_eq!(journal.draft.narration, "BPV voucher");
    let bank_line = journal
        .draft
        .lines
        .iter()
        .find(|l| l.account_id == chart.bank.id)
        .unwrap();
    assert_eq!(bank_line.credit, dec!(5000));

    let second = service
        .post(payload(
            "BPV",
            Some(chart.bank.id),
            vec![VoucherLineInput::debit(chart.expense.id, dec!(120))],
        ))
        .await
        .unwrap();
    assert_ne!(second.id, posted.id);
    assert_ne!(second.journal_entry, posted.journal_entry);
}

#[tokio::test]
async fn test_rejected_voucher_writes_nothing() {
    let (store, chart) = seeded_store().await;
    let service = VoucherPostingService::new(
        VoucherValidationEngine::default(),
        store.clone(),
        store.clone(),
    );

    let err = service
        .post(payload(
            "CPV",
            Some(chart.bank.id),
            vec![VoucherLineInput::debit(chart.expense.id, dec!(5000))],
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Voucher(VoucherError::WrongControlCategory { .. })
    ));
    assert_eq!(err.http_status_code(), 400);

    let err = service
        .post(payload(
            "BPV",
            Some(chart.bank.id),
            vec![VoucherLineInput::debit(chart.income.id, dec!(100))],
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Voucher(VoucherError::ForbiddenLineCategory { .. })
    ));

    let unknown = AccountId::new();
    let err = service
        .post(payload(
            "JV",
            None,
            vec![
                VoucherLineInput::debit(unknown, dec!(10)),
                VoucherLineInput::credit(chart.payable.id, dec!(10)),
            ],
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Voucher(VoucherError::AccountNotFound(id)) if id == unknown
    ));

    let err = service
        .post(payload("XYZ", None, Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Voucher(VoucherError::InvalidVoucherType(_))
    ));

    assert!(store.journals().await.is_empty());
}

#[tokio::test]
async fn test_reverse_once() {
    let (store, chart) = seeded_store().await;
    let service = VoucherPostingService::new(
        VoucherValidationEngine::default(),
        store.clone(),
        store.clone(),
    );
    let posted = service
        .post(payload(
            "JV",
            None,
            vec![
                VoucherLineInput::debit(chart.expense.id, dec!(250.50)),
                VoucherLineInput::credit(chart.payable.id, dec!(250.50)),
            ],
        ))
        .await
        .unwrap();

    let reversal_id = service
        .reverse(posted.journal_entry, date(2025, 3, 5), "Posted to wrong period")
        .await
        .unwrap();

    let reversal = store.find(reversal_id).await.unwrap().unwrap();
    assert_eq!(reversal.reverses, Some(posted.journal_entry));
    let expense_line = reversal
        .draft
        .lines
        .iter()
        .find(|l| l.account_id == chart.expense.id)
        .unwrap();
    assert_eq!(expense_line.debit, Decimal::ZERO);
    assert_eq!(expense_line.credit, dec!(250.50));

    let original = store.find(posted.journal_entry).await.unwrap().unwrap();
    assert_eq!(original.reversed_by, Some(reversal_id));

    let err = service
        .reverse(posted.journal_entry, date(2025, 3, 6), "again")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyReversed(id) if id == posted.journal_entry));
    assert_eq!(err.http_status_code(), 409);
    assert_eq!(store.journals().await.len(), 2);
}

#[tokio::test]
async fn test_reverse_unknown_entry() {
    let (store, _) = seeded_store().await;
    let service = VoucherPostingService::new(
        VoucherValidationEngine::default(),
        store.clone(),
        store.clone(),
    );

    let missing = JournalEntryId::new();
    let err = service
        .reverse(missing, date(2025, 3, 5), "typo")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::JournalNotFound(id) if id == missing));
    assert_eq!(err.http_status_code(), 404);
}
