//! Indexed document types
//!
//! A [`MatchDoc`] is one match rendered as a natural-language summary plus
//! the structured metadata the router filters on. Docs are created once at
//! index-build time and never mutated; the vector store owns them for its
//! lifetime.

use serde::{Deserialize, Serialize};

/// A rendered match summary with its metadata
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct MatchDoc {
    /// Stable identifier: the source row index as a string
    pub id: String,
    /// Human-readable summary of the match
    pub content: String,
    /// Structured fields for exact-match filtering
    pub metadata: MatchMetadata,
}

/// Metadata attached to each match document
///
/// Team names here are canonical: the same strings the alias table resolves
/// to. Equality filtering in the router depends on that.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct MatchMetadata {
    pub team1: String,
    pub team2: String,
    pub team1_short: String,
    pub team2_short: String,
    /// Display form, `"{team1} vs {team2}"`
    pub matchup: String,
    pub winner: String,
    pub match_number: String,
    pub team1score: String,
    pub team2score: String,
}

impl MatchMetadata {
    /// Did the given team play in this match, on either side?
    #[must_use]
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    /// Is this match between the two given teams, in either order?
    #[must_use]
    pub fn is_pairing(&self, a: &str, b: &str) -> bool {
        (self.team1 == a && self.team2 == b) || (self.team1 == b && self.team2 == a)
    }
}

impl MatchDoc {
    /// Key used to deduplicate documents across retrieval paths.
    ///
    /// Uses the match number when present. The fallback is the first 50
    /// characters of the content, which can merge distinct documents that
    /// share a prefix.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        if self.metadata.match_number.is_empty() {
            self.content.chars().take(50).collect()
        } else {
            self.metadata.match_number.clone()
        }
    }
}
