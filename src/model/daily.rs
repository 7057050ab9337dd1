use serde::{Deserialize, Serialize};

/// One day's medal-event digest, keyed by its calendar date.
///
/// Derived entirely from the run's [`EventRecord`](super::EventRecord) set;
/// never authored independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMedalAggregate {
    /// ISO calendar date, `YYYY-MM-DD`. Doubles as the document identity.
    pub date: String,
    pub total_medal_events: u32,
    /// Distinct sports represented that day, alphabetically sorted.
    pub sports: Vec<String>,
    /// Per-event summaries, ascending by time.
    pub events: Vec<EventSummary>,
    pub source: String,
    /// RFC 3339 timestamp of the run that produced this aggregate.
    pub updated_at: String,
}

/// Compact per-event view embedded in a daily aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub sport: String,
    pub time: String,
    pub icon: String,
}
