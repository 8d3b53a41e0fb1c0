//! Liquidity Lease node binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use lease_runtime::{init_logging, run_demo, LeaseConfig, LeaseContainer, SnapshotStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = LeaseConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    init_logging(&config.telemetry).context("Failed to initialize logging")?;

    info!("===========================================");
    info!("  Liquidity Lease Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let store = SnapshotStore::new(config.storage.snapshot_path());
    let container = Arc::new(LeaseContainer::new(config));

    if let Some(snapshot) = store.load().context("Failed to load snapshot")? {
        container
            .restore(snapshot)
            .context("Snapshot rejected by the channel ledger")?;
    }

    // The services are synchronous; keep them off the async workers.
    let demo_container = Arc::clone(&container);
    let report = tokio::task::spawn_blocking(move || run_demo(&demo_container))
        .await
        .context("Demo task panicked")??;

    info!(
        rental_id = report.rental_id,
        channel_id = %hex::encode(report.channel_id),
        swaps = report.swaps,
        fees_earned = %report.fees_earned,
        owner_payout = %report.settlement.owner_payout,
        platform_fee = %report.settlement.platform_fee,
        net_profit = %report.profits.net_profit,
        roi_bps = report.profits.roi_basis_points,
        "Demo lease settled"
    );

    store
        .save(&container.snapshot())
        .context("Failed to save snapshot")?;
    info!(path = %store.path().display(), "Shutdown complete");
    Ok(())
}
