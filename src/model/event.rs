use serde::{Deserialize, Serialize};

/// A single medal-bearing schedule entry for one sport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Content hash of (sport, date, time, title), truncated. Stable across
    /// runs for unchanged inputs, which is what makes upserts idempotent.
    pub id: String,
    pub title: String,
    pub sport: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// 24-hour wall-clock time, always zero-padded `HH:MM`.
    pub time: String,
    /// Iconography tag rendered next to the event.
    pub icon: String,
    #[serde(rename = "isMedalEvent")]
    pub is_medal_event: bool,
    /// Producer tag scoping reconciliation.
    pub source: String,
}

/// Static metadata for one sport's schedule page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SportPage {
    /// Display label stored on every event scraped from this page.
    pub sport: &'static str,
    pub icon: SportIcon,
    /// Page slug appended to the wiki base URL.
    pub slug: &'static str,
}

/// Icon classes used by the site for schedule entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SportIcon {
    #[strum(serialize = "fa-solid fa-person-skiing")]
    Skiing,
    #[strum(serialize = "fa-solid fa-person-skiing-nordic")]
    NordicSkiing,
    #[strum(serialize = "fa-solid fa-person-skating")]
    Skating,
    #[strum(serialize = "fa-solid fa-person-snowboarding")]
    Snowboarding,
    #[strum(serialize = "fa-solid fa-hockey-puck")]
    HockeyPuck,
    #[strum(serialize = "fa-regular fa-snowflake")]
    Snowflake,
}
