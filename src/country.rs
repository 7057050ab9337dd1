//! Country-name to region-code resolution.
//!
//! Names are matched case-insensitively against the English ISO 3166 table,
//! with two small alias layers on top: common reporting names that differ
//! from ISO official names, and the three-letter codes Olympic reporting
//! uses where they diverge from ISO.

const FLAG_CDN_BASE: &str = "https://flagcdn.com/w40";

/// Common short names the standings page uses that do not equal the ISO
/// official name, mapped to their alpha-2 code.
const NAME_ALIASES: &[(&str, &str)] = &[
    ("united states", "US"),
    ("great britain", "GB"),
    ("united kingdom", "GB"),
    ("south korea", "KR"),
    ("north korea", "KP"),
    ("czech republic", "CZ"),
    ("czechia", "CZ"),
    ("russia", "RU"),
    ("chinese taipei", "TW"),
    ("taiwan", "TW"),
    ("iran", "IR"),
    ("moldova", "MD"),
    ("turkey", "TR"),
    ("türkiye", "TR"),
    ("netherlands", "NL"),
];

/// ISO alpha-3 codes rewritten to the codes conventionally used in Olympic
/// reporting.
const OLYMPIC_CODE_ALIASES: &[(&str, &str)] = &[
    ("DEU", "GER"),
    ("CHE", "SUI"),
    ("NLD", "NED"),
    ("DNK", "DEN"),
    ("SVN", "SLO"),
    ("HRV", "CRO"),
    ("LVA", "LAT"),
    ("BGR", "BUL"),
    ("GRC", "GRE"),
    ("PRT", "POR"),
    ("CHL", "CHI"),
];

/// A resolved country: alpha-2 for the flag CDN, alpha-3 (Olympic-aliased)
/// as the document identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedCountry {
    pub alpha2: String,
    pub alpha3: String,
}

impl ResolvedCountry {
    /// Flag image address for this country.
    pub(crate) fn flag_url(&self) -> String {
        if self.alpha2.is_empty() {
            return String::new();
        }
        format!("{FLAG_CDN_BASE}/{}.png", self.alpha2.to_lowercase())
    }
}

/// Resolve a sanitized country name. `None` means the caller should drop
/// the row; no synthetic placeholder code is ever produced.
pub(crate) fn resolve_country(name: &str) -> Option<ResolvedCountry> {
    let needle = normalize_name(name);
    if needle.is_empty() {
        return None;
    }

    let aliased = NAME_ALIASES
        .iter()
        .find(|(alias, _)| normalize_name(alias) == needle)
        .map(|(_, alpha2)| *alpha2);

    let (alpha2, alpha3) = match aliased {
        Some(alpha2) => {
            let record = rust_iso3166::from_alpha2(alpha2)?;
            (record.alpha2, record.alpha3)
        }
        None => {
            let record = rust_iso3166::ALL
                .iter()
                .find(|c| normalize_name(c.name) == needle)?;
            (record.alpha2, record.alpha3)
        }
    };

    Some(ResolvedCountry {
        alpha2: alpha2.to_string(),
        alpha3: olympic_code(alpha3),
    })
}

/// Apply the Olympic-convention override for a resolved alpha-3 code.
fn olympic_code(alpha3: &str) -> String {
    OLYMPIC_CODE_ALIASES
        .iter()
        .find(|(iso, _)| *iso == alpha3)
        .map(|(_, olympic)| (*olympic).to_string())
        .unwrap_or_else(|| alpha3.to_string())
}

/// Lowercase and keep only alphanumeric characters, so that punctuation and
/// spacing differences never break a lookup.
fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn germany_gets_the_olympic_code() {
        let resolved = resolve_country("Germany").unwrap();
        assert_eq!(resolved.alpha2, "DE");
        assert_eq!(resolved.alpha3, "GER");
    }

    #[test]
    fn iso_codes_pass_through_unaliased() {
        let resolved = resolve_country("Norway").unwrap();
        assert_eq!(resolved.alpha3, "NOR");
    }

    #[test]
    fn common_short_names_resolve() {
        assert_eq!(resolve_country("United States").unwrap().alpha3, "USA");
        assert_eq!(resolve_country("Netherlands").unwrap().alpha3, "NED");
        assert_eq!(resolve_country("South Korea").unwrap().alpha3, "KOR");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(resolve_country("FRANCE").unwrap().alpha3, "FRA");
        assert_eq!(resolve_country("italy").unwrap().alpha3, "ITA");
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        assert!(resolve_country("Ruritania").is_none());
        assert!(resolve_country("").is_none());
        assert!(resolve_country("12").is_none());
    }

    #[test]
    fn flag_url_uses_lowercase_alpha2() {
        let resolved = resolve_country("Germany").unwrap();
        assert_eq!(resolved.flag_url(), "https://flagcdn.com/w40/de.png");
    }
}
