//! Ledger source priority and derivation through the unified service.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tenura_core::deal::{DealPayment, DealStatus, PaymentMode};
use tenura_core::ledger::{
    EntityRef, LedgerDerivation, LedgerFilters, LedgerRow, LedgerSourceKind, SourceType,
};
use tenura_shared::config::AccountingConfig;
use tenura_shared::types::{ClientId, DealerId, LedgerRowId, PaymentId};
use tenura_store::repository::LedgerSource;
use tenura_store::services::UnifiedLedgerService;
use tenura_store::{MemoryStore, ServiceError, SourceError, StoreError};

use common::{date, deal};

fn service(store: &Arc<MemoryStore>) -> UnifiedLedgerService {
    UnifiedLedgerService::from_config(store.ledger_sources(), &AccountingConfig::default())
}

fn payment(amount: Decimal, day: u32) -> DealPayment {
    DealPayment {
        id: PaymentId::new(),
        amount,
        date: date(2025, 2, day),
        mode: PaymentMode::Cash,
        reference: None,
        deleted: false,
    }
}

fn row(entity: EntityRef, debit: Decimal, credit: Decimal, source_type: SourceType) -> LedgerRow {
    LedgerRow {
        id: LedgerRowId::new(),
        entity,
        account_id: None,
        date: date(2024, 12, 31),
        debit,
        credit,
        source_type,
        narration: "Imported balance".to_string(),
        reference: None,
    }
}

async fn store_with_sale() -> (Arc<MemoryStore>, EntityRef) {
    let store = Arc::new(MemoryStore::new());
    let mut sale = deal("D-100", DealStatus::Active, dec!(500));
    sale.payments.push(payment(dec!(100), 20));
    sale.payments.push(payment(dec!(200), 5));
    let entity = EntityRef::Client(sale.client_id);
    store.insert_deal(sale).await;
    (store, entity)
}

#[tokio::test]
async fn test_synthetic_running_balance() {
    let (store, entity) = store_with_sale().await;

    let ledger = service(&store)
        .get_ledger(entity, &LedgerFilters::default())
        .await
        .unwrap();

    assert_eq!(ledger.source, Some(LedgerSourceKind::Synthetic));
    assert!(ledger.unavailable_sources.is_empty());
    let balances: Vec<_> = ledger.entries.iter().map(|e| e.running_balance).collect();
    assert_eq!(balances, vec![dec!(0), dec!(500), dec!(300), dec!(200)]);
    assert_eq!(ledger.entries[0].description, "Opening Balance");
    assert_eq!(ledger.summary.deal_value, dec!(500));
    assert_eq!(ledger.summary.received, dec!(300));
    assert_eq!(ledger.summary.outstanding, dec!(200));
    assert!(!ledger.summary.has_legacy_entries);
}

#[tokio::test]
async fn test_engine_rows_win_without_merging() {
    let (store, entity) = store_with_sale().await;
    store
        .insert_ledger_row(row(entity, dec!(75), Decimal::ZERO, SourceType::Journal))
        .await;

    let ledger = service(&store)
        .get_ledger(entity, &LedgerFilters::default())
        .await
        .unwrap();

    assert_eq!(ledger.source, Some(LedgerSourceKind::LedgerEngine));
    assert_eq!(ledger.entries.len(), 2);
    assert_eq!(ledger.summary.closing_balance, dec!(75));
    assert_eq!(ledger.summary.deal_value, Decimal::ZERO);
}

#[tokio::test]
async fn test_unavailable_source_is_skipped_and_reported() {
    let (store, entity) = store_with_sale().await;
    store.mark_unavailable(LedgerSourceKind::LedgerEngine).await;

    let ledger = service(&store)
        .get_ledger(entity, &LedgerFilters::default())
        .await
        .unwrap();

    assert_eq!(ledger.source, Some(LedgerSourceKind::Synthetic));
    assert_eq!(
        ledger.unavailable_sources,
        vec![LedgerSourceKind::LedgerEngine]
    );
}

#[tokio::test]
async fn test_legacy_fallback_sets_flag() {
    let store = Arc::new(MemoryStore::new());
    let dealer = EntityRef::Dealer(DealerId::new());
    store
        .insert_legacy_row(row(dealer, Decimal::ZERO, dec!(40), SourceType::Payment))
        .await;

    let ledger = service(&store)
        .get_ledger(dealer, &LedgerFilters::default())
        .await
        .unwrap();

    assert_eq!(ledger.source, Some(LedgerSourceKind::Legacy));
    assert!(ledger.summary.has_legacy_entries);
    assert_eq!(ledger.summary.closing_balance, dec!(-40));
}

#[tokio::test]
async fn test_no_rows_anywhere() {
    let store = Arc::new(MemoryStore::new());
    store.mark_unavailable(LedgerSourceKind::Legacy).await;

    let ledger = service(&store)
        .get_ledger(EntityRef::Client(ClientId::new()), &LedgerFilters::default())
        .await
        .unwrap();

    assert_eq!(ledger.source, None);
    assert!(ledger.entries.is_empty());
    assert_eq!(ledger.summary.outstanding, Decimal::ZERO);
    assert_eq!(ledger.unavailable_sources, vec![LedgerSourceKind::Legacy]);
}

#[tokio::test]
async fn test_filters_apply_after_source_selection() {
    let (store, entity) = store_with_sale().await;

    let filters = LedgerFilters {
        source_types: vec![SourceType::Payment],
        ..LedgerFilters::default()
    };
    let ledger = service(&store).get_ledger(entity, &filters).await.unwrap();

    assert_eq!(ledger.source, Some(LedgerSourceKind::Synthetic));
    let balances: Vec<_> = ledger.entries.iter().map(|e| e.running_balance).collect();
    assert_eq!(balances, vec![dec!(0), dec!(-200), dec!(-300)]);

    let filters = LedgerFilters {
        from: Some(date(2026, 1, 1)),
        ..LedgerFilters::default()
    };
    let ledger = service(&store).get_ledger(entity, &filters).await.unwrap();
    assert_eq!(ledger.source, Some(LedgerSourceKind::Synthetic));
    assert!(ledger.entries.is_empty());
}

struct BrokenSource;

#[async_trait]
impl LedgerSource for BrokenSource {
    fn kind(&self) -> LedgerSourceKind {
        LedgerSourceKind::LedgerEngine
    }

    async fn fetch(&self, _entity: EntityRef) -> Result<Vec<LedgerRow>, SourceError> {
        Err(SourceError::Failed {
            source_kind: LedgerSourceKind::LedgerEngine,
            error: StoreError::Backend("connection reset".to_string()),
        })
    }
}

#[tokio::test]
async fn test_source_failure_propagates() {
    let (store, entity) = store_with_sale().await;
    let mut sources: Vec<Arc<dyn LedgerSource>> = vec![Arc::new(BrokenSource)];
    sources.extend(store.ledger_sources());
    let service = UnifiedLedgerService::new(sources, LedgerDerivation::default());

    let err = service
        .get_ledger(entity, &LedgerFilters::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Source(SourceError::Failed { .. })
    ));
    assert_eq!(err.http_status_code(), 500);
}
