use ::scraper::{ElementRef, Selector};
use tracing::{debug, warn};

use crate::country::resolve_country;
use crate::error::Result;
use crate::model::MedalEntry;
use crate::scraper::{
    self, cell_texts, cells_selector, parse_count, row_text_lowercase, sanitize_country,
    CANDIDATE_TABLE_SELECTOR,
};

/// Positional indices assumed when a header keyword is absent. They encode
/// the common rank/country/gold/silver/bronze layout; a table with a
/// different column order and no descriptive headers will be mis-read.
const FALLBACK_COUNTRY_IDX: usize = 1;
const FALLBACK_GOLD_IDX: usize = 2;
const FALLBACK_SILVER_IDX: usize = 3;
const FALLBACK_BRONZE_IDX: usize = 4;

/// One header-to-column rule: the first header cell containing any keyword
/// wins, otherwise the fallback index applies.
struct ColumnRule {
    keywords: &'static [&'static str],
    fallback: usize,
}

const COUNTRY_RULE: ColumnRule = ColumnRule {
    keywords: &["noc", "nation", "team", "country"],
    fallback: FALLBACK_COUNTRY_IDX,
};
const GOLD_RULE: ColumnRule = ColumnRule {
    keywords: &["gold"],
    fallback: FALLBACK_GOLD_IDX,
};
const SILVER_RULE: ColumnRule = ColumnRule {
    keywords: &["silver"],
    fallback: FALLBACK_SILVER_IDX,
};
const BRONZE_RULE: ColumnRule = ColumnRule {
    keywords: &["bronze"],
    fallback: FALLBACK_BRONZE_IDX,
};

impl ColumnRule {
    fn resolve(&self, headers: &[String]) -> usize {
        headers
            .iter()
            .position(|h| {
                let h = h.to_lowercase();
                self.keywords.iter().any(|k| h.contains(k))
            })
            .unwrap_or(self.fallback)
    }
}

/// Role-to-index mapping for one standings table.
struct ColumnMap {
    country: usize,
    gold: usize,
    silver: usize,
    bronze: usize,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Self {
        Self {
            country: COUNTRY_RULE.resolve(headers),
            gold: GOLD_RULE.resolve(headers),
            silver: SILVER_RULE.resolve(headers),
            bronze: BRONZE_RULE.resolve(headers),
        }
    }
}

/// Extract the medal standings from a page.
///
/// The standings table is the first candidate table whose header row
/// mentions gold, silver and bronze. An absent table yields an empty list,
/// not an error; rows that fail sanitization or country resolution are
/// dropped individually.
pub(crate) fn parse_medal_table(document: &scraper::Html, source: &str) -> Result<Vec<MedalEntry>> {
    let table_selector = Selector::parse(CANDIDATE_TABLE_SELECTOR)?;
    let row_selector = Selector::parse("tr")?;
    let cell_selector = cells_selector()?;

    let Some(table) = document.select(&table_selector).find(|table| {
        table
            .select(&row_selector)
            .next()
            .map(|row| {
                let header = row_text_lowercase(&row);
                header.contains("gold") && header.contains("silver") && header.contains("bronze")
            })
            .unwrap_or(false)
    }) else {
        debug!("no medal standings table found");
        return Ok(Vec::new());
    };

    let mut rows = table.select(&row_selector);
    let columns = match rows.next() {
        Some(header_row) => ColumnMap::resolve(&cell_texts(&header_row, &cell_selector)),
        None => return Ok(Vec::new()),
    };

    let entries: Vec<MedalEntry> = rows
        .filter_map(|row| parse_entry(&row, &columns, &cell_selector, source))
        .collect();

    debug!(count = entries.len(), "parsed medal standings");
    Ok(entries)
}

fn parse_entry(
    row: &ElementRef,
    columns: &ColumnMap,
    cell_selector: &Selector,
    source: &str,
) -> Option<MedalEntry> {
    let cells = cell_texts(row, cell_selector);

    let country = sanitize_country(cells.get(columns.country)?);
    if !country.chars().any(char::is_alphabetic) {
        return None;
    }

    let Some(resolved) = resolve_country(&country) else {
        warn!(country, "dropping row with unresolvable country");
        return None;
    };

    Some(MedalEntry {
        code: resolved.alpha3.clone(),
        country,
        flag: resolved.flag_url(),
        gold: parse_count(cells.get(columns.gold).map_or("", String::as_str)),
        silver: parse_count(cells.get(columns.silver).map_or("", String::as_str)),
        bronze: parse_count(cells.get(columns.bronze).map_or("", String::as_str)),
        source: source.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::Html;

    const STANDINGS_PAGE: &str = r#"
        <table class="wikitable">
          <tr><th>Rank</th><th>NOC</th><th>Gold</th><th>Silver</th><th>Bronze</th><th>Total</th></tr>
          <tr><td>1</td><th>Norway[a]</th><td>5</td><td>3</td><td>1</td><td>9</td></tr>
          <tr><td>2</td><th>Germany (GER)</th><td>4</td><td>2</td><td>2</td><td>8</td></tr>
          <tr><td>3</td><th>Italy*</th><td>2</td><td>–</td><td>4</td><td>6</td></tr>
          <tr><td>4</td><th>Ruritania</th><td>1</td><td>0</td><td>0</td><td>1</td></tr>
          <tr><th colspan="2">Totals (4 entries)</th><td>12</td><td>5</td><td>7</td><td>24</td></tr>
        </table>
    "#;

    #[test]
    fn parses_ranked_entries_in_source_order() {
        let document = Html::parse_document(STANDINGS_PAGE);
        let entries = parse_medal_table(&document, "test-source").unwrap();

        let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["NOR", "GER", "ITA"]);

        let norway = &entries[0];
        assert_eq!(norway.country, "Norway");
        assert_eq!(norway.flag, "https://flagcdn.com/w40/no.png");
        assert_eq!((norway.gold, norway.silver, norway.bronze), (5, 3, 1));
        assert_eq!(norway.source, "test-source");
    }

    #[test]
    fn unparsable_counts_become_zero() {
        let document = Html::parse_document(STANDINGS_PAGE);
        let entries = parse_medal_table(&document, "test-source").unwrap();
        let italy = entries.iter().find(|e| e.code == "ITA").unwrap();
        assert_eq!((italy.gold, italy.silver, italy.bronze), (2, 0, 4));
    }

    #[test]
    fn unresolvable_and_totals_rows_are_dropped() {
        let document = Html::parse_document(STANDINGS_PAGE);
        let entries = parse_medal_table(&document, "test-source").unwrap();
        assert!(entries.iter().all(|e| e.country != "Ruritania"));
        assert!(entries.iter().all(|e| !e.country.starts_with("Totals")));
    }

    #[test]
    fn rank_shifted_rows_fail_validation() {
        // Tied entries share the rank cell via rowspan, shifting every cell
        // left; the country column then holds a count, which has no letter
        // character and rejects the row.
        let page = r#"
            <table class="wikitable">
              <tr><th>Rank</th><th>NOC</th><th>Gold</th><th>Silver</th><th>Bronze</th></tr>
              <tr><td rowspan="2">1</td><th>Norway</th><td>5</td><td>3</td><td>1</td></tr>
              <tr><th>Sweden</th><td>5</td><td>3</td><td>1</td></tr>
            </table>
        "#;
        let document = Html::parse_document(page);
        let entries = parse_medal_table(&document, "test-source").unwrap();
        let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["NOR"]);
    }

    #[test]
    fn headerless_columns_fall_back_to_fixed_positions() {
        let page = r#"
            <table class="wikitable">
              <tr><th>#</th><th>—</th><th>Gold</th><th>Silver</th><th>Bronze</th></tr>
              <tr><td>1</td><td>France</td><td>3</td><td>1</td><td>2</td></tr>
            </table>
        "#;
        let document = Html::parse_document(page);
        let entries = parse_medal_table(&document, "test-source").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, "FRA");
        assert_eq!(entries[0].gold, 3);
    }

    #[test]
    fn missing_table_yields_empty_list() {
        let document = Html::parse_document("<p>No standings published yet.</p>");
        let entries = parse_medal_table(&document, "test-source").unwrap();
        assert!(entries.is_empty());
    }
}
