//! Source match records and CSV ingestion
//!
//! One [`MatchRecord`] per CSV row. Every field is kept as a string and
//! missing values come through as empty strings, which then flow blank into
//! both the rendered summary and the metadata. No validation happens here.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::doc::{MatchDoc, MatchMetadata};
use crate::teams;
use crate::{Error, Result};

/// One row of source match data. Immutable once loaded.
#[derive(Debug, Clone, Default, Deserialize, Eq, PartialEq)]
pub struct MatchRecord {
    #[serde(rename = "Match_Number", default)]
    pub match_number: String,
    #[serde(rename = "Team_1", default)]
    pub team1: String,
    #[serde(rename = "Team_2", default)]
    pub team2: String,
    #[serde(rename = "Date_Time", default)]
    pub date_time: String,
    #[serde(rename = "Venue", default)]
    pub venue: String,
    #[serde(rename = "Team_1_Score", default)]
    pub team1_score: String,
    #[serde(rename = "Team_2_Score", default)]
    pub team2_score: String,
    #[serde(rename = "winner", default)]
    pub winner: String,
    #[serde(rename = "winning_margin", default)]
    pub winning_margin: String,
}

impl MatchRecord {
    /// Render the record as the natural-language summary that gets embedded.
    ///
    /// The text repeats the pairing in several phrasings so matchup-style
    /// questions land near it in embedding space.
    #[must_use]
    pub fn render(&self) -> String {
        let team1 = self.team1.trim();
        let team2 = self.team2.trim();
        format!(
            "Match Number: {}\n\
             Teams: {team1} vs {team2}\n\
             Matchup: {team1} versus {team2}\n\
             Date & Time: {}\n\
             Venue: {}\n\
             Team 1: {team1} (Score: {})\n\
             Team 2: {team2} (Score: {})\n\
             Winner: {}\n\
             Winning Margin: {}\n\
             Head to head: {team1} against {team2}\n\
             Direct matchup between {team1} and {team2}",
            self.match_number,
            self.date_time,
            self.venue,
            self.team1_score,
            self.team2_score,
            self.winner,
            self.winning_margin,
        )
    }

    /// Build the indexed document for this record.
    ///
    /// `row_index` becomes the stable document id.
    #[must_use]
    pub fn to_doc(&self, row_index: usize) -> MatchDoc {
        let team1 = self.team1.trim().to_string();
        let team2 = self.team2.trim().to_string();

        let metadata = MatchMetadata {
            team1_short: teams::short_name(&team1).to_string(),
            team2_short: teams::short_name(&team2).to_string(),
            matchup: format!("{team1} vs {team2}"),
            winner: self.winner.clone(),
            match_number: self.match_number.clone(),
            team1score: self.team1_score.clone(),
            team2score: self.team2_score.clone(),
            team1,
            team2,
        };

        MatchDoc {
            id: row_index.to_string(),
            content: self.render(),
            metadata,
        }
    }
}

/// Load all match records from a CSV file.
pub fn load_records(path: &Path) -> Result<Vec<MatchRecord>> {
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Data(format!("{}: {e}", path.display())))?;
    read_records(file)
}

fn read_records<R: Read>(reader: R) -> Result<Vec<MatchRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<MatchRecord>, _>>()
        .map_err(|e| Error::Data(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Match_Number,Team_1,Team_2,Date_Time,Venue,Team_1_Score,Team_2_Score,winner,winning_margin";

    #[test]
    fn test_read_full_row() {
        let csv = format!(
            "{HEADER}\n1,Chennai Super Kings,Royal Challengers Bengaluru,\
             \"Mar 22, 7:30 PM\",Chennai,176/6,173/6,Chennai Super Kings,6 wickets\n"
        );
        let records = read_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.match_number, "1");
        assert_eq!(r.team1, "Chennai Super Kings");
        assert_eq!(r.winner, "Chennai Super Kings");
        assert_eq!(r.winning_margin, "6 wickets");
    }

    #[test]
    fn test_missing_fields_become_empty_strings() {
        // Short row: winner and margin columns absent entirely
        let csv = format!("{HEADER}\n2,Mumbai Indians,Gujarat Titans,,Ahmedabad,,\n");
        let records = read_records(csv.as_bytes()).unwrap();

        let r = &records[0];
        assert_eq!(r.team1, "Mumbai Indians");
        assert_eq!(r.date_time, "");
        assert_eq!(r.winner, "");
        assert_eq!(r.winning_margin, "");
    }

    #[test]
    fn test_render_contains_all_phrasings() {
        let record = MatchRecord {
            match_number: "5".to_string(),
            team1: "Chennai Super Kings".to_string(),
            team2: "Mumbai Indians".to_string(),
            winner: "Mumbai Indians".to_string(),
            ..MatchRecord::default()
        };
        let content = record.render();

        assert!(content.contains("Match Number: 5"));
        assert!(content.contains("Chennai Super Kings vs Mumbai Indians"));
        assert!(content.contains("Chennai Super Kings versus Mumbai Indians"));
        assert!(content.contains("Head to head: Chennai Super Kings against Mumbai Indians"));
        assert!(content.contains("Winner: Mumbai Indians"));
    }

    #[test]
    fn test_to_doc_builds_canonical_metadata() {
        let record = MatchRecord {
            match_number: "12".to_string(),
            team1: " Chennai Super Kings ".to_string(),
            team2: "Mumbai Indians".to_string(),
            team1_score: "182/4".to_string(),
            team2_score: "178/9".to_string(),
            winner: "Chennai Super Kings".to_string(),
            ..MatchRecord::default()
        };
        let doc = record.to_doc(11);

        assert_eq!(doc.id, "11");
        // Team names trimmed to the canonical form
        assert_eq!(doc.metadata.team1, "Chennai Super Kings");
        assert_eq!(doc.metadata.team1_short, "CSK");
        assert_eq!(doc.metadata.team2_short, "MI");
        assert_eq!(doc.metadata.matchup, "Chennai Super Kings vs Mumbai Indians");
        assert_eq!(doc.metadata.match_number, "12");
        assert_eq!(doc.metadata.team1score, "182/4");
    }

    #[test]
    fn test_empty_input() {
        let records = read_records(HEADER.as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
