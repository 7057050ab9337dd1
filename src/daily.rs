use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::model::{DailyMedalAggregate, EventRecord, EventSummary};

/// Build one aggregate per calendar date from the run's medal-bearing
/// events.
///
/// Within a date, summaries are ordered by their zero-padded `HH:MM` time
/// (string order equals chronological order) and the sports set is distinct
/// and alphabetically sorted. `now` is stamped as the last-update time.
pub(crate) fn build_daily_aggregates(
    events: &[EventRecord],
    source: &str,
    now: DateTime<Utc>,
) -> Vec<DailyMedalAggregate> {
    let mut by_date: BTreeMap<&str, Vec<&EventRecord>> = BTreeMap::new();
    for event in events.iter().filter(|e| e.is_medal_event) {
        by_date.entry(event.date.as_str()).or_default().push(event);
    }

    by_date
        .into_iter()
        .map(|(date, mut day_events)| {
            day_events.sort_by(|a, b| a.time.cmp(&b.time));

            let sports: BTreeSet<&str> = day_events.iter().map(|e| e.sport.as_str()).collect();

            DailyMedalAggregate {
                date: date.to_string(),
                total_medal_events: day_events.len() as u32,
                sports: sports.into_iter().map(str::to_string).collect(),
                events: day_events
                    .iter()
                    .map(|e| EventSummary {
                        id: e.id.clone(),
                        title: e.title.clone(),
                        sport: e.sport.clone(),
                        time: e.time.clone(),
                        icon: e.icon.clone(),
                    })
                    .collect(),
                source: source.to_string(),
                updated_at: now.to_rfc3339(),
            }
        })
        .collect()
}
