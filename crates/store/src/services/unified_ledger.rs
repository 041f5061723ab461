//! Unified ledger over prioritized row sources.
//!
//! Sources are asked in order and the first one with rows for the entity
//! wins. Results are never merged. A source that reports itself unavailable
//! is skipped and listed in the response; any other failure aborts the
//! request.

use std::sync::Arc;

use async_trait::async_trait;
use tenura_core::ledger::{
    EntityRef, LedgerDerivation, LedgerFilters, LedgerResponse, LedgerRow, LedgerSourceKind,
    synthetic_rows,
};
use tenura_shared::config::AccountingConfig;

use crate::error::{ServiceError, SourceError};
use crate::repository::{DealRepository, LedgerSource};

/// Ledger rows derived on the fly from an entity's deals and payments.
pub struct DealLedgerSource<D: DealRepository> {
    deals: Arc<D>,
}

impl<D: DealRepository> DealLedgerSource<D> {
    /// Create a source backed by `deals`.
    #[must_use]
    pub fn new(deals: Arc<D>) -> Self {
        Self { deals }
    }
}

#[async_trait]
impl<D: DealRepository> LedgerSource for DealLedgerSource<D> {
    fn kind(&self) -> LedgerSourceKind {
        LedgerSourceKind::Synthetic
    }

    async fn fetch(&self, entity: EntityRef) -> Result<Vec<LedgerRow>, SourceError> {
        let deals = self
            .deals
            .list_for_entity(entity)
            .await
            .map_err(|error| SourceError::Failed {
                source_kind: LedgerSourceKind::Synthetic,
                error,
            })?;
        Ok(synthetic_rows(entity, &deals))
    }
}

/// Client, dealer and property ledgers.
pub struct UnifiedLedgerService {
    sources: Vec<Arc<dyn LedgerSource>>,
    derivation: LedgerDerivation,
}

impl UnifiedLedgerService {
    /// Create a service over `sources`, highest priority first.
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn LedgerSource>>, derivation: LedgerDerivation) -> Self {
        Self {
            sources,
            derivation,
        }
    }

    /// Create a service using the configured opening-balance label.
    #[must_use]
    pub fn from_config(sources: Vec<Arc<dyn LedgerSource>>, config: &AccountingConfig) -> Self {
        Self::new(
            sources,
            LedgerDerivation::new(config.opening_balance_label.clone()),
        )
    }

    /// Builds the ledger of `entity` from the first source that has rows.
    ///
    /// With no rows anywhere the response is empty and `source` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Source` if a source fails for any reason other
    /// than being unavailable.
    pub async fn get_ledger(
        &self,
        entity: EntityRef,
        filters: &LedgerFilters,
    ) -> Result<LedgerResponse, ServiceError> {
        let mut unavailable = Vec::new();

        for source in &self.sources {
            match source.fetch(entity).await {
                Ok(rows) if rows.is_empty() => {
                    tracing::debug!(entity = %entity, source = source.name(), "Ledger source empty, falling through");
                }
                Ok(rows) => {
                    tracing::debug!(
                        entity = %entity,
                        source = source.name(),
                        rows = rows.len(),
                        "Ledger source selected"
                    );
                    let mut response =
                        self.derivation
                            .derive(entity, Some(source.kind()), rows, filters);
                    response.unavailable_sources = unavailable;
                    return Ok(response);
                }
                Err(SourceError::Unavailable {
                    source_kind,
                    reason,
                }) => {
                    tracing::warn!(entity = %entity, source = source.name(), %reason, "Ledger source unavailable");
                    unavailable.push(source_kind);
                }
                Err(e) => {
                    tracing::error!(entity = %entity, source = source.name(), error = %e, "Ledger source failed");
                    return Err(e.into());
                }
            }
        }

        let mut response = self.derivation.derive(entity, None, Vec::new(), filters);
        response.unavailable_sources = unavailable;
        Ok(response)
    }
}
