//! Medal-event classification by title keywords.
//!
//! Exclusion always wins: a title matching any exclusion keyword is never a
//! medal event, no matter which inclusion keywords it also contains.

/// Keywords that mark qualifying or training activity.
pub const EXCLUDE_KEYWORDS: &[&str] = &[
    "qualification",
    "qualifying",
    "qualifier",
    "training",
    "practice",
    "round robin",
    "round-robin",
    "preliminary",
    "group stage",
    "group-stage",
    "heats",
    "seeding",
];

/// Keywords that mark rounds awarding final placements.
pub const INCLUDE_KEYWORDS: &[&str] = &[
    "final",
    "medal",
    "relay",
    "pursuit",
    "mass start",
    "individual",
    "team event",
    "sprint",
    "downhill",
    "super-g",
    "slalom",
    "combined",
    "moguls",
    "aerials",
    "big air",
    "halfpipe",
    "slopestyle",
    "skiathlon",
];

/// Decide whether an event title describes a medal-bearing round.
pub fn is_medal_event(title: &str) -> bool {
    let title = title.to_lowercase();
    if EXCLUDE_KEYWORDS.iter().any(|k| title.contains(k)) {
        return false;
    }
    INCLUDE_KEYWORDS.iter().any(|k| title.contains(k))
}
