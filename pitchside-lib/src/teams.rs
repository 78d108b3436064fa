//! Canonical team names and alias resolution
//!
//! The alias table maps lowercase keyword substrings to the single
//! authoritative form of each team name. The same canonical strings are
//! written into document metadata at index time, so exact-match filtering
//! at query time only works if both sides go through this module.
//!
//! The table is an ordered slice, not a map: question scanning walks it in
//! declaration order, so the first team a question resolves to is the one
//! appearing earliest here, regardless of word order in the question.

/// Alias substring -> canonical team name, in scan order.
pub const TEAM_ALIASES: &[(&str, &str)] = &[
    ("rcb", "Royal Challengers Bengaluru"),
    ("royal challengers bengaluru", "Royal Challengers Bengaluru"),
    ("royal challengers", "Royal Challengers Bengaluru"),
    ("srh", "Sunrisers Hyderabad"),
    ("sunrisers hyderabad", "Sunrisers Hyderabad"),
    ("sunrisers", "Sunrisers Hyderabad"),
    ("csk", "Chennai Super Kings"),
    ("chennai super kings", "Chennai Super Kings"),
    ("mi", "Mumbai Indians"),
    ("mumbai indians", "Mumbai Indians"),
    ("kkr", "Kolkata Knight Riders"),
    ("kolkata knight riders", "Kolkata Knight Riders"),
    ("rr", "Rajasthan Royals"),
    ("rajasthan royals", "Rajasthan Royals"),
    ("gt", "Gujarat Titans"),
    ("gujarat titans", "Gujarat Titans"),
    ("pbks", "Punjab Kings"),
    ("punjab kings", "Punjab Kings"),
    ("dc", "Delhi Capitals"),
    ("delhi capitals", "Delhi Capitals"),
    ("lsg", "Lucknow Super Giants"),
    ("lucknow super giants", "Lucknow Super Giants"),
];

/// Canonical team name -> short code.
pub const TEAM_SHORT_CODES: &[(&str, &str)] = &[
    ("Royal Challengers Bengaluru", "RCB"),
    ("Sunrisers Hyderabad", "SRH"),
    ("Chennai Super Kings", "CSK"),
    ("Mumbai Indians", "MI"),
    ("Kolkata Knight Riders", "KKR"),
    ("Rajasthan Royals", "RR"),
    ("Gujarat Titans", "GT"),
    ("Punjab Kings", "PBKS"),
    ("Delhi Capitals", "DC"),
    ("Lucknow Super Giants", "LSG"),
];

/// Collect every canonical team mentioned in an already-lowercased question.
///
/// Matching is raw substring containment against the alias table, walked in
/// table order. Duplicates are kept when several aliases of one team match.
#[must_use]
pub fn find_mentioned(question_lower: &str) -> Vec<&'static str> {
    TEAM_ALIASES
        .iter()
        .filter(|(alias, _)| question_lower.contains(alias))
        .map(|(_, canonical)| *canonical)
        .collect()
}

/// Short code for a canonical team name, or the name itself if unknown.
#[must_use]
pub fn short_name(canonical: &str) -> &str {
    TEAM_SHORT_CODES
        .iter()
        .find(|(name, _)| *name == canonical)
        .map_or(canonical, |(_, code)| code)
}
