pub(crate) mod medal_table;
pub(crate) mod schedule;

pub(crate) use ::scraper::Html;
use ::scraper::{ElementRef, Selector};
use itertools::Itertools;
use tracing::debug;

use crate::error::{Result, SyncError};

/// Tables considered when hunting for the standings or a schedule.
pub(crate) const CANDIDATE_TABLE_SELECTOR: &str = "table.wikitable";

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| SyncError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| SyncError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// Strip footnote markers (`[...]`) and collapse whitespace.
pub(crate) fn clean_text(raw: &str) -> String {
    collapse_whitespace(&strip_enclosed(raw, '[', ']'))
}

/// Sanitize a country cell: drop asterisks, parenthetical annotations and
/// footnote markers, then collapse whitespace.
pub(crate) fn sanitize_country(raw: &str) -> String {
    let no_refs = strip_enclosed(raw, '[', ']');
    let no_parens = strip_enclosed(&no_refs, '(', ')');
    collapse_whitespace(&no_parens.replace('*', ""))
}

/// Cleaned text of every `th`/`td` cell in a row, in document order.
pub(crate) fn cell_texts(row: &ElementRef, cells: &Selector) -> Vec<String> {
    row.select(cells)
        .map(|cell| clean_text(&cell.text().collect::<String>()))
        .collect()
}

/// Parse a medal count cell, defaulting unparsable values to zero.
pub(crate) fn parse_count(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

/// Full flattened text of a row, lowercased, for header heuristics.
pub(crate) fn row_text_lowercase(row: &ElementRef) -> String {
    clean_text(&row.text().collect::<String>()).to_lowercase()
}

/// Selector for row cells, shared by both table parsers.
pub(crate) fn cells_selector() -> Result<Selector> {
    Ok(Selector::parse("th, td")?)
}

fn strip_enclosed(text: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for ch in text.chars() {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth = depth.saturating_sub(1);
        } else if depth == 0 {
            out.push(ch);
        }
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}
