//! Tenura ledger audit
//!
//! Loads a store snapshot and prints the ledger of one client, dealer or
//! property as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use tenura_core::ledger::{EntityRef, LedgerFilters};
use tenura_shared::AppConfig;
use tenura_shared::types::{ClientId, DealerId, PropertyId};
use tenura_store::services::UnifiedLedgerService;
use tenura_store::{MemoryStore, StoreSnapshot};

#[derive(Parser, Debug)]
#[command(name = "ledger-audit")]
#[command(about = "Print the derived ledger of an entity from a JSON snapshot")]
#[command(version)]
struct Cli {
    /// Snapshot file
    snapshot: PathBuf,

    /// Entity as `client:<uuid>`, `dealer:<uuid>` or `property:<uuid>`
    #[arg(value_parser = parse_entity)]
    entity: EntityRef,

    /// Keep rows dated on or after this day (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Keep rows dated on or before this day (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl Cli {
    fn filters(&self) -> LedgerFilters {
        LedgerFilters {
            from: self.from,
            to: self.to,
            ..LedgerFilters::default()
        }
    }
}

fn parse_entity(raw: &str) -> Result<EntityRef, String> {
    let (kind, id) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected <kind>:<uuid>, got {raw}"))?;
    let id = Uuid::parse_str(id).map_err(|e| format!("invalid entity id {id}: {e}"))?;
    match kind {
        "client" => Ok(EntityRef::Client(ClientId::from_uuid(id))),
        "dealer" => Ok(EntityRef::Dealer(DealerId::from_uuid(id))),
        "property" => Ok(EntityRef::Property(PropertyId::from_uuid(id))),
        other => Err(format!("unknown entity kind {other}")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Logs go to stderr so stdout stays valid JSON
    let json = config.logging.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let raw = tokio::fs::read_to_string(&cli.snapshot)
        .await
        .with_context(|| format!("Failed to read snapshot {}", cli.snapshot.display()))?;
    let snapshot = StoreSnapshot::from_json(&raw)?;
    info!(
        path = %cli.snapshot.display(),
        accounts = snapshot.accounts.len(),
        deals = snapshot.deals.len(),
        "Snapshot loaded"
    );

    let store = Arc::new(MemoryStore::from_snapshot(snapshot));
    let ledger = UnifiedLedgerService::from_config(store.ledger_sources(), &config.accounting)
        .get_ledger(cli.entity, &cli.filters())
        .await?;

    info!(
        entity = %cli.entity,
        source = ?ledger.source,
        entries = ledger.entries.len(),
        outstanding = %ledger.summary.outstanding,
        "Ledger derived"
    );
    println!("{}", serde_json::to_string_pretty(&ledger)?);

    Ok(())
}
