use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One row of the medal standings, keyed by its Olympic three-letter code.
///
/// At most one live entry exists per code and source tag; the reconciliation
/// engine enforces this by using the code as the document identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalEntry {
    /// Three-letter region code after Olympic alias normalization.
    pub code: String,
    /// Display name as it appeared on the standings page, sanitized.
    pub country: String,
    /// Flag image address derived from the two-letter code.
    pub flag: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    /// Producer tag scoping reconciliation.
    pub source: String,
}

impl MedalEntry {
    /// Standings comparator: gold, then silver, then bronze, descending.
    /// Ties compare equal so a stable sort retains source order.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .gold
            .cmp(&self.gold)
            .then(other.silver.cmp(&self.silver))
            .then(other.bronze.cmp(&self.bronze))
    }
}
