use chrono::NaiveDate;
use ::scraper::Selector;
use tracing::{debug, warn};

use crate::classify::is_medal_event;
use crate::config::SyncConfig;
use crate::error::Result;
use crate::ident::deterministic_id;
use crate::model::{EventRecord, SportPage};
use crate::scraper::{
    self, cell_texts, cells_selector, row_text_lowercase, CANDIDATE_TABLE_SELECTOR,
};

/// Date cell formats seen on schedule pages, tried in order against the
/// cell text with the games year appended.
const SCHEDULE_DATE_FORMATS: [&str; 8] = [
    "%e %B %Y",
    "%B %e %Y",
    "%e %b %Y",
    "%b %e %Y",
    "%A %e %B %Y",
    "%A, %e %B %Y",
    "%a %e %b %Y",
    "%a, %e %b %Y",
];

/// ISO date format used for stored records.
const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Extract the medal-bearing schedule entries from one sport's page.
///
/// The schedule table is the first candidate table whose header row mentions
/// date, time and event; a page without one contributes no events. Source
/// pages visually merge date cells across consecutive times, so the most
/// recent explicit date is carried forward over rows that lack one.
pub(crate) fn parse_schedule(
    document: &scraper::Html,
    page: &SportPage,
    config: &SyncConfig,
) -> Result<Vec<EventRecord>> {
    let table_selector = Selector::parse(CANDIDATE_TABLE_SELECTOR)?;
    let row_selector = Selector::parse("tr")?;
    let cell_selector = cells_selector()?;

    let Some(table) = document.select(&table_selector).find(|table| {
        table
            .select(&row_selector)
            .next()
            .map(|row| {
                let header = row_text_lowercase(&row);
                header.contains("date") && header.contains("time") && header.contains("event")
            })
            .unwrap_or(false)
    }) else {
        debug!(sport = page.sport, "no schedule table found");
        return Ok(Vec::new());
    };

    let mut events = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for row in table.select(&row_selector).skip(1) {
        let cells = cell_texts(&row, &cell_selector);
        if cells.len() < 2 {
            continue;
        }

        // Three or more cells carry an explicit date; exactly two inherit it.
        let (date_text, time_text, title) = if cells.len() >= 3 {
            (cells[0].as_str(), cells[1].as_str(), cells[2].as_str())
        } else {
            ("", cells[0].as_str(), cells[1].as_str())
        };

        if !date_text.is_empty() {
            current_date = parse_games_date(date_text, config.games_year);
            if current_date.is_none() {
                debug!(sport = page.sport, date_text, "unparsable date cell");
            }
        }

        let Some(date) = current_date else { continue };
        if title.is_empty() {
            continue;
        }
        if !is_medal_event(title) {
            continue;
        }
        if date > config.games_end_date {
            warn!(sport = page.sport, %date, title, "dropping row past games end date");
            continue;
        }

        let date = date.format(STORED_DATE_FORMAT).to_string();
        let time = normalize_time(time_text);
        let id = deterministic_id(&[page.sport, &date, &time, title]);

        events.push(EventRecord {
            id,
            title: title.to_string(),
            sport: page.sport.to_string(),
            date,
            time,
            icon: page.icon.to_string(),
            is_medal_event: true,
            source: config.source_tag.clone(),
        });
    }

    debug!(sport = page.sport, count = events.len(), "parsed schedule");
    Ok(events)
}

/// Parse a schedule date cell, which omits the year, into a calendar date.
fn parse_games_date(text: &str, year: i32) -> Option<NaiveDate> {
    let candidate = format!("{text} {year}");
    SCHEDULE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&candidate, format).ok())
}

/// Extract the first `H:MM` or `HH:MM` pattern anywhere in the cell,
/// zero-padding the hour. Absent a match, default to `00:00`.
fn normalize_time(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        if ch != ':' {
            continue;
        }
        let hour_lo = i
            .checked_sub(1)
            .and_then(|j| chars.get(j))
            .filter(|c| c.is_ascii_digit());
        let minute_hi = chars.get(i + 1).filter(|c| c.is_ascii_digit());
        let minute_lo = chars.get(i + 2).filter(|c| c.is_ascii_digit());
        if let (Some(h), Some(m1), Some(m2)) = (hour_lo, minute_hi, minute_lo) {
            let hour = match i
                .checked_sub(2)
                .and_then(|j| chars.get(j))
                .filter(|c| c.is_ascii_digit())
            {
                Some(h10) => format!("{h10}{h}"),
                None => format!("0{h}"),
            };
            return format!("{hour}:{m1}{m2}");
        }
    }
    "00:00".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SportIcon;
    use crate::scraper::Html;

    const PAGE: SportPage = SportPage {
        sport: "Biathlon",
        icon: SportIcon::NordicSkiing,
        slug: "Biathlon_at_the_2026_Winter_Olympics",
    };

    const SCHEDULE_PAGE: &str = r#"
        <table class="wikitable">
          <tr><th>Date</th><th>Time</th><th>Event</th></tr>
          <tr><td rowspan="2">10 February</td><td>9:30</td><td>Women's 15km Individual</td></tr>
          <tr><td>14:00</td><td>Men's Training Session</td></tr>
          <tr><td>11 February</td><td>CET</td><td>Mixed Relay</td></tr>
          <tr><td>25 February</td><td>10:00</td><td>Exhibition Mass Start</td></tr>
        </table>
    "#;

    fn parse(page_html: &str) -> Vec<EventRecord> {
        let document = Html::parse_document(page_html);
        parse_schedule(&document, &PAGE, &SyncConfig::default()).unwrap()
    }

    #[test]
    fn rows_without_a_date_inherit_the_previous_one() {
        let events = parse(SCHEDULE_PAGE);
        // The training row is non-medal, but its date handling is exercised
        // by the relay on the 11th following the two-cell row.
        assert_eq!(events[0].date, "2026-02-10");
        assert_eq!(events[1].date, "2026-02-11");
    }

    #[test]
    fn times_are_zero_padded_and_defaulted() {
        let events = parse(SCHEDULE_PAGE);
        assert_eq!(events[0].time, "09:30");
        // No H:MM pattern in the cell at all.
        assert_eq!(events[1].time, "00:00");
    }

    #[test]
    fn non_medal_rows_are_dropped() {
        let events = parse(SCHEDULE_PAGE);
        assert!(events.iter().all(|e| e.title != "Men's Training Session"));
        assert!(events.iter().all(|e| e.is_medal_event));
    }

    #[test]
    fn rows_past_the_games_end_date_are_dropped() {
        let events = parse(SCHEDULE_PAGE);
        assert!(events.iter().all(|e| e.title != "Exhibition Mass Start"));
    }

    #[test]
    fn identities_are_stable_across_parses() {
        let first = parse(SCHEDULE_PAGE);
        let second = parse(SCHEDULE_PAGE);
        let first_ids: Vec<&str> = first.iter().map(|e| e.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
        assert!(first_ids.iter().all(|id| id.len() == crate::ident::ID_LEN));
    }

    #[test]
    fn missing_schedule_table_yields_no_events() {
        assert!(parse("<table class=\"wikitable\"><tr><th>Athlete</th></tr></table>").is_empty());
    }

    #[test]
    fn unparsable_dates_skip_their_rows() {
        let page = r#"
            <table class="wikitable">
              <tr><th>Date</th><th>Time</th><th>Event</th></tr>
              <tr><td>Someday</td><td>10:00</td><td>Team Relay</td></tr>
            </table>
        "#;
        assert!(parse(page).is_empty());
    }

    #[test]
    fn time_normalization_handles_noise() {
        assert_eq!(normalize_time("9:30"), "09:30");
        assert_eq!(normalize_time("19:30–21:00"), "19:30");
        assert_eq!(normalize_time("approx. 8:05 CET"), "08:05");
        assert_eq!(normalize_time("TBD"), "00:00");
    }
}
