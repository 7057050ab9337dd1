use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::SyncConfig;
use crate::daily::build_daily_aggregates;
use crate::error::Result;
use crate::model::EventRecord;
use crate::scraper;
use crate::store::{DocumentStore, DAILY_COLLECTION, EVENTS_COLLECTION, MEDALS_COLLECTION};
use crate::sync::{reconcile, SyncStats};

/// Per-collection outcome of one full pipeline run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunReport {
    pub medals: SyncStats,
    pub events: SyncStats,
    pub dailies: SyncStats,
    /// Events parsed this run across all sport pages.
    pub event_count: usize,
}

/// The main entry point for one scrape-and-reconcile run.
///
/// `SyncClient` wraps a [`reqwest::Client`] and a [`DocumentStore`] and
/// exposes methods to sync the medal standings, the per-sport schedules,
/// and the daily digests derived from them.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> olympic_sync::Result<()> {
/// use olympic_sync::{MemoryStore, SyncClient};
///
/// let client = SyncClient::new(MemoryStore::new());
/// let report = client.run().await?;
/// println!("Synced {} events", report.event_count);
/// # Ok(())
/// # }
/// ```
pub struct SyncClient<S> {
    http: reqwest::Client,
    store: S,
    config: SyncConfig,
}

impl<S: DocumentStore> SyncClient<S> {
    /// Create a client with default settings and production configuration.
    pub fn new(store: S) -> Self {
        Self::with_client(reqwest::Client::new(), store)
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(http: reqwest::Client, store: S) -> Self {
        Self::with_config(http, store, SyncConfig::default())
    }

    /// Create a client with an explicit configuration.
    pub fn with_config(http: reqwest::Client, store: S, config: SyncConfig) -> Self {
        Self {
            http,
            store,
            config,
        }
    }

    /// Scrape the medal standings page and reconcile the `medals`
    /// collection. A fetch failure here is fatal to the run.
    #[instrument(skip(self))]
    pub async fn sync_medals(&self) -> Result<SyncStats> {
        let entries = {
            let document =
                scraper::get_document(&self.http, &self.config.medal_table_url).await?;
            scraper::medal_table::parse_medal_table(&document, &self.config.source_tag)?
        };

        let fresh = entries
            .iter()
            .map(|entry| Ok((entry.code.clone(), serde_json::to_value(entry)?)))
            .collect::<Result<Vec<(String, Value)>>>()?;

        reconcile(
            &self.store,
            MEDALS_COLLECTION,
            &self.config.source_tag,
            fresh,
            &[],
        )
        .await
    }

    /// Scrape every sport's schedule page and reconcile the `events`
    /// collection. A failure on one page is logged and skipped; the
    /// remaining sports still contribute, so one broken page only reduces
    /// that run's coverage.
    #[instrument(skip(self))]
    pub async fn sync_events(&self) -> Result<(Vec<EventRecord>, SyncStats)> {
        let mut all_events = Vec::new();

        for page in &self.config.sport_pages {
            let url = self.config.sport_page_url(page.slug);
            let parsed = match scraper::get_document(&self.http, &url).await {
                Ok(document) => scraper::schedule::parse_schedule(&document, page, &self.config),
                Err(e) => {
                    warn!(slug = page.slug, error = %e, "skipping sport page");
                    continue;
                }
            };
            match parsed {
                Ok(events) => all_events.extend(events),
                Err(e) => warn!(slug = page.slug, error = %e, "skipping unparsable schedule"),
            }
        }

        let fresh = all_events
            .iter()
            .map(|event| Ok((event.id.clone(), serde_json::to_value(event)?)))
            .collect::<Result<Vec<(String, Value)>>>()?;

        let stats = reconcile(
            &self.store,
            EVENTS_COLLECTION,
            &self.config.source_tag,
            fresh,
            &[],
        )
        .await?;
        Ok((all_events, stats))
    }

    /// Group the run's events into per-day digests and reconcile the
    /// `daily_medal_events` collection, keyed by date.
    #[instrument(skip(self, events))]
    pub async fn sync_daily_summaries(&self, events: &[EventRecord]) -> Result<SyncStats> {
        let aggregates = build_daily_aggregates(events, &self.config.source_tag, Utc::now());

        let fresh = aggregates
            .iter()
            .map(|day| Ok((day.date.clone(), serde_json::to_value(day)?)))
            .collect::<Result<Vec<(String, Value)>>>()?;

        reconcile(
            &self.store,
            DAILY_COLLECTION,
            &self.config.source_tag,
            fresh,
            &["updatedAt"],
        )
        .await
    }

    /// Run the full pipeline: standings, schedules, then daily digests.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<RunReport> {
        self.config.validate()?;

        let medals = self.sync_medals().await?;
        let (events, event_stats) = self.sync_events().await?;
        let dailies = self.sync_daily_summaries(&events).await?;

        info!(
            medal_upserts = medals.upserts,
            medal_deletes = medals.deletes,
            event_count = events.len(),
            event_upserts = event_stats.upserts,
            event_deletes = event_stats.deletes,
            daily_upserts = dailies.upserts,
            daily_deletes = dailies.deletes,
            "sync run complete"
        );

        Ok(RunReport {
            medals,
            events: event_stats,
            dailies,
            event_count: events.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SportIcon;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn invalid_config_fails_before_any_fetch() {
        let config = SyncConfig {
            source_tag: String::new(),
            ..SyncConfig::default()
        };
        let client = SyncClient::with_config(reqwest::Client::new(), MemoryStore::new(), config);
        let err = client.run().await.unwrap_err();
        assert!(matches!(err, crate::SyncError::Config(_)));
    }

    #[tokio::test]
    async fn unreachable_sport_pages_reduce_coverage_without_failing_the_run() {
        // Connections to the discard port are refused, so every sport page
        // fetch fails; the run must still succeed with zero events.
        let config = SyncConfig {
            wiki_base_url: "http://127.0.0.1:9".to_string(),
            ..SyncConfig::default()
        };
        let client = SyncClient::with_config(reqwest::Client::new(), MemoryStore::new(), config);

        let (events, stats) = client.sync_events().await.unwrap();
        assert!(events.is_empty());
        assert_eq!(stats, SyncStats::default());
    }

    #[tokio::test]
    async fn unreachable_medal_table_is_fatal() {
        let config = SyncConfig {
            medal_table_url: "http://127.0.0.1:9/medals".to_string(),
            ..SyncConfig::default()
        };
        let client = SyncClient::with_config(reqwest::Client::new(), MemoryStore::new(), config);

        let err = client.sync_medals().await.unwrap_err();
        assert!(matches!(err, crate::SyncError::Http { .. }));
    }

    #[tokio::test]
    async fn daily_summaries_land_in_the_daily_collection() {
        let client = SyncClient::new(MemoryStore::new());
        let events = vec![EventRecord {
            id: "abc123".to_string(),
            title: "Final".to_string(),
            sport: "Curling".to_string(),
            date: "2026-02-10".to_string(),
            time: "09:00".to_string(),
            icon: SportIcon::Snowflake.to_string(),
            is_medal_event: true,
            source: "wikipedia-cortina-2026".to_string(),
        }];

        let stats = client.sync_daily_summaries(&events).await.unwrap();
        assert_eq!(stats.upserts, 1);

        let doc = client.store.get("daily_medal_events", "2026-02-10").unwrap();
        assert_eq!(doc["totalMedalEvents"], serde_json::json!(1));
        assert_eq!(doc["sports"], serde_json::json!(["Curling"]));
    }
}
