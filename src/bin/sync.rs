use olympic_sync::{MemoryStore, SyncClient, SyncConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// One scrape-and-reconcile run against an in-process store. Exits non-zero
/// on configuration failure, a medal-table fetch failure, or any other
/// uncaught error; per-sport page failures only reduce coverage.
///
/// The [`MemoryStore`] here is ephemeral: it starts empty, so the prune path
/// never fires, and its contents vanish at exit. Production deployments
/// substitute a persistent [`olympic_sync::DocumentStore`] implementation
/// backed by a managed document store.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SyncConfig::from_env();
    let client = SyncClient::with_config(reqwest::Client::new(), MemoryStore::new(), config);

    match client.run().await {
        Ok(report) => info!(
            medal_upserts = report.medals.upserts,
            event_count = report.event_count,
            daily_upserts = report.dailies.upserts,
            "sync finished"
        ),
        Err(e) => {
            error!(error = %e, "sync failed");
            std::process::exit(1);
        }
    }
}
