use chrono::NaiveDate;

use crate::error::{Result, SyncError};
use crate::model::{SportIcon, SportPage};

/// Year appended to schedule date cells, which omit it on the source pages.
pub const GAMES_YEAR: i32 = 2026;

/// Last day of competition. Rows dated after this are discarded.
const GAMES_END: (i32, u32, u32) = (2026, 2, 22);

const MEDAL_TABLE_URL: &str = "https://en.wikipedia.org/wiki/2026_Winter_Olympics_medal_table";
const WIKI_BASE_URL: &str = "https://en.wikipedia.org/wiki";
const SOURCE_TAG: &str = "wikipedia-cortina-2026";

/// The per-sport schedule pages scraped on every run. Sport labels are the
/// display strings stored alongside each event.
pub const SPORT_PAGES: [SportPage; 16] = [
    SportPage {
        sport: "Narciarstwo alpejskie",
        icon: SportIcon::Skiing,
        slug: "Alpine_skiing_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Biathlon",
        icon: SportIcon::NordicSkiing,
        slug: "Biathlon_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Bobsleje",
        icon: SportIcon::Snowflake,
        slug: "Bobsleigh_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Biegi narciarskie",
        icon: SportIcon::NordicSkiing,
        slug: "Cross-country_skiing_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Curling",
        icon: SportIcon::Snowflake,
        slug: "Curling_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Łyżwiarstwo figurowe",
        icon: SportIcon::Skating,
        slug: "Figure_skating_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Narciarstwo dowolne",
        icon: SportIcon::Skiing,
        slug: "Freestyle_skiing_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Hokej na lodzie",
        icon: SportIcon::HockeyPuck,
        slug: "Ice_hockey_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Saneczkarstwo",
        icon: SportIcon::Snowflake,
        slug: "Luge_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Kombinacja norweska",
        icon: SportIcon::NordicSkiing,
        slug: "Nordic_combined_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Short track",
        icon: SportIcon::Skating,
        slug: "Short_track_speed_skating_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Skeleton",
        icon: SportIcon::Snowflake,
        slug: "Skeleton_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Skoki narciarskie",
        icon: SportIcon::Snowboarding,
        slug: "Ski_jumping_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Skialpinizm",
        icon: SportIcon::Snowflake,
        slug: "Ski_mountaineering_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Snowboard",
        icon: SportIcon::Snowboarding,
        slug: "Snowboarding_at_the_2026_Winter_Olympics",
    },
    SportPage {
        sport: "Łyżwiarstwo szybkie",
        icon: SportIcon::Skating,
        slug: "Speed_skating_at_the_2026_Winter_Olympics",
    },
];

/// Runtime configuration for one sync run.
///
/// [`Default`] yields the production values; tests and the runner binary
/// override individual fields (URLs, source tag) as needed.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Address of the medal standings page. A fetch failure here is fatal.
    pub medal_table_url: String,
    /// Base address that sport page slugs are appended to.
    pub wiki_base_url: String,
    /// Tag stamped on every document this pipeline writes. Reconciliation
    /// only ever prunes documents carrying this tag.
    pub source_tag: String,
    /// Year appended to schedule date cells before parsing.
    pub games_year: i32,
    /// Events dated after this are dropped even when otherwise valid.
    pub games_end_date: NaiveDate,
    /// Sport schedule pages scraped each run.
    pub sport_pages: Vec<SportPage>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let (year, month, day) = GAMES_END;
        Self {
            medal_table_url: MEDAL_TABLE_URL.to_string(),
            wiki_base_url: WIKI_BASE_URL.to_string(),
            source_tag: SOURCE_TAG.to_string(),
            games_year: GAMES_YEAR,
            games_end_date: NaiveDate::from_ymd_opt(year, month, day)
                .unwrap_or(NaiveDate::MAX),
            sport_pages: SPORT_PAGES.to_vec(),
        }
    }
}

impl SyncConfig {
    /// Production configuration with URL and source-tag overrides taken from
    /// the environment (`MEDAL_TABLE_URL`, `WIKI_BASE_URL`, `SOURCE_TAG`).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("MEDAL_TABLE_URL") {
            config.medal_table_url = url;
        }
        if let Ok(url) = std::env::var("WIKI_BASE_URL") {
            config.wiki_base_url = url;
        }
        if let Ok(tag) = std::env::var("SOURCE_TAG") {
            config.source_tag = tag;
        }
        config
    }

    /// Full address of one sport's schedule page.
    pub fn sport_page_url(&self, slug: &str) -> String {
        format!("{}/{}", self.wiki_base_url.trim_end_matches('/'), slug)
    }

    /// Reject configurations that would make the run meaningless before any
    /// network traffic happens.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.medal_table_url.trim().is_empty() {
            return Err(SyncError::Config("medal table URL is empty".into()));
        }
        if self.wiki_base_url.trim().is_empty() {
            return Err(SyncError::Config("wiki base URL is empty".into()));
        }
        if self.source_tag.trim().is_empty() {
            return Err(SyncError::Config("source tag is empty".into()));
        }
        Ok(())
    }
}
