//! `orderlens sync`: one full sync against the configured endpoint.

use anyhow::Context;
use orderlens_core::AppConfig;
use orderlens_store::JsonFileStore;
use orderlens_sync::{
    OrderClient, PaginationPolicy, ProgressUpdate, SyncEngine, SyncError, SyncOutcome,
};

/// Runs a sync and prints its summary.
///
/// The stored snapshot is only replaced when the whole history was fetched.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the session is missing,
/// any page fails, or the snapshot cannot be written.
pub(crate) async fn run_sync(config: &AppConfig) -> anyhow::Result<()> {
    let client = OrderClient::from_config(config)?;
    let store = JsonFileStore::new(&config.store_path);
    let engine = SyncEngine::new(client, store, PaginationPolicy::from_config(config));

    match engine.restore() {
        Ok(Some(previous)) => tracing::info!(
            orders = previous.order_count(),
            last_updated = %previous.last_updated,
            "previous snapshot loaded"
        ),
        Ok(None) => tracing::info!("no previous snapshot; performing first sync"),
        Err(error) => tracing::warn!(%error, "stored snapshot unreadable; it will be replaced"),
    }

    let progress = |update: ProgressUpdate| {
        tracing::info!(stage = %update.stage, percent = update.percent, "sync progress");
    };

    let outcome = match engine.sync(&progress).await {
        Ok(outcome) => outcome,
        Err(SyncError::NotAuthenticated { url }) => {
            anyhow::bail!(
                "not logged in: the order history request ended at {url}; \
                 sign in to the site in a browser and set ORDERLENS_SESSION_COOKIE"
            );
        }
        Err(error) => {
            return Err(error).context("sync failed; the stored snapshot was left unchanged");
        }
    };

    match outcome {
        SyncOutcome::Synced(summary) => {
            println!(
                "synced {} orders from {} page(s) at {}",
                summary.order_count,
                summary.pages_fetched,
                summary.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
            );
            if summary.degraded_records > 0 {
                println!(
                    "{} order(s) had an unreadable date or cost and were stored with defaults",
                    summary.degraded_records
                );
            }
            println!("snapshot written to {}", config.store_path.display());
        }
        SyncOutcome::NoData { .. } => {
            println!(
                "no orders found; check that you are logged in and have order history \
                 (stored snapshot left unchanged)"
            );
        }
    }

    Ok(())
}
