//! Hybrid query routing and retrieval
//!
//! Questions are routed through a priority policy before any embedding
//! happens:
//!
//! 1. one mentioned team + a performance keyword -> the team's full match
//!    history via metadata filtering (no result cap)
//! 2. two mentioned teams -> exact matchup filtering merged with semantic
//!    search, deduplicated, capped at `k`
//! 3. otherwise -> plain semantic nearest-neighbor search, capped at `k`
//!
//! # Usage
//!
//! ```ignore
//! use pitchside_lib::search::{SearchEngine, DEFAULT_K};
//!
//! let mut engine = SearchEngine::new(embedder, store);
//! let retrieval = engine.retrieve("CSK vs MI head to head", DEFAULT_K)?;
//! println!("{:?}: {} docs", retrieval.mode, retrieval.docs.len());
//! ```

use std::collections::HashSet;

use crate::doc::MatchDoc;
use crate::embed::Embedder;
use crate::store::VectorStore;
use crate::teams;
use crate::Result;

/// Default number of results for the capped retrieval modes.
pub const DEFAULT_K: usize = 20;

/// Keywords marking a question as being about team performance.
///
/// Matched by substring containment against the lowercased question.
pub const PERFORMANCE_KEYWORDS: &[&str] = &[
    "win",
    "wins",
    "won",
    "match",
    "matches",
    "play",
    "played",
    "performance",
    "season",
    "loss",
    "losses",
    "lost",
    "how many",
    "total",
    "all",
];

/// Which retrieval branch a question was routed to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RouteMode {
    /// Every match a single team played, via metadata filtering
    TeamHistory { team: String },
    /// Exact two-team pairing merged with semantic fill
    Matchup { team1: String, team2: String },
    /// Nearest-neighbor search only
    Semantic,
}

/// The outcome of routing one question.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub mode: RouteMode,
    pub docs: Vec<MatchDoc>,
}

/// Retrieval engine combining embedding, storage, and the routing policy.
///
/// Owns its embedder and store; construct one per process and pass it by
/// reference. The metadata-filter modes run an unbounded full scan of the
/// store per question - fine for one season, a known limitation beyond that.
pub struct SearchEngine<E: Embedder, S: VectorStore> {
    embedder: E,
    store: S,
}

impl<E: Embedder, S: VectorStore> SearchEngine<E, S> {
    /// Create a new engine over an already-populated store.
    #[must_use]
    pub fn new(embedder: E, store: S) -> Self {
        Self { embedder, store }
    }

    /// Index documents by computing embeddings and storing them.
    pub fn index(&mut self, docs: &[MatchDoc]) -> Result<()> {
        if docs.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = docs.iter().map(|d| d.content.as_str()).collect();
        let embeddings = self.embedder.embed_documents(&texts)?;
        self.store.insert(docs, &embeddings)?;

        Ok(())
    }

    /// Route a question and retrieve the documents that ground its answer.
    ///
    /// `k` bounds the matchup and semantic modes; team-history mode returns
    /// every match the team played regardless of `k`. An empty result set is
    /// not an error - the caller decides how to report it.
    pub fn retrieve(&mut self, question: &str, k: usize) -> Result<Retrieval> {
        let question_lower = question.to_lowercase();
        let mentioned = teams::find_mentioned(&question_lower);
        let performance = is_performance_query(&question_lower);

        if !mentioned.is_empty() && performance {
            let team = mentioned[0];
            tracing::debug!(team, "routing to team history");

            let docs: Vec<MatchDoc> = self
                .store
                .all()
                .into_iter()
                .filter(|d| d.metadata.involves(team))
                .collect();

            tracing::debug!(team, count = docs.len(), "team history matches");
            return Ok(Retrieval {
                mode: RouteMode::TeamHistory {
                    team: team.to_string(),
                },
                docs,
            });
        }

        if mentioned.len() >= 2 {
            let (team1, team2) = (mentioned[0], mentioned[1]);
            tracing::debug!(team1, team2, "routing to matchup");

            let mut docs: Vec<MatchDoc> = self
                .store
                .all()
                .into_iter()
                .filter(|d| d.metadata.is_pairing(team1, team2))
                .collect();
            tracing::debug!(team1, team2, count = docs.len(), "direct matchups");

            // Semantic results fill behind the exact pairing matches
            docs.extend(self.semantic(question, k)?);

            let mut deduped = dedup_docs(docs);
            deduped.truncate(k);

            return Ok(Retrieval {
                mode: RouteMode::Matchup {
                    team1: team1.to_string(),
                    team2: team2.to_string(),
                },
                docs: deduped,
            });
        }

        tracing::debug!("routing to semantic search");
        Ok(Retrieval {
            mode: RouteMode::Semantic,
            docs: self.semantic(question, k)?,
        })
    }

    fn semantic(&mut self, question: &str, k: usize) -> Result<Vec<MatchDoc>> {
        let query_embedding = self.embedder.embed_query(question)?;
        let results = self.store.search(&query_embedding, k)?;
        Ok(results.into_iter().map(|r| r.doc).collect())
    }

    /// Returns the number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no documents are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns a reference to the embedder.
    #[must_use]
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Returns a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a mutable reference to the store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

fn is_performance_query(question_lower: &str) -> bool {
    PERFORMANCE_KEYWORDS
        .iter()
        .any(|keyword| question_lower.contains(keyword))
}

/// Drop later occurrences of the same match, keeping first-seen order.
fn dedup_docs(docs: Vec<MatchDoc>) -> Vec<MatchDoc> {
    let mut seen = HashSet::new();
    docs.into_iter()
        .filter(|doc| seen.insert(doc.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::MatchMetadata;
    use crate::embed::Embedding;
    use crate::store::MemoryStore;

    /// Deterministic embedder for routing tests. The vector only depends on
    /// the text length, which is enough for stable brute-force rankings.
    struct StubEmbedder;

    impl Embedder for StubEmbedder {
        fn embed_documents(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
            Ok(texts.iter().map(|t| stub_vector(t)).collect())
        }

        fn embed_query(&mut self, text: &str) -> Result<Embedding> {
            Ok(stub_vector(text))
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn stub_vector(text: &str) -> Embedding {
        vec![text.len() as f32, 1.0]
    }

    fn make_match(num: usize, team1: &str, team2: &str) -> MatchDoc {
        MatchDoc {
            id: num.to_string(),
            content: format!("Match Number: {num}\nTeams: {team1} vs {team2}"),
            metadata: MatchMetadata {
                team1: team1.to_string(),
                team2: team2.to_string(),
                matchup: format!("{team1} vs {team2}"),
                match_number: num.to_string(),
                ..MatchMetadata::default()
            },
        }
    }

    /// Eight matches; Chennai Super Kings play in four, twice against
    /// Mumbai Indians.
    fn season() -> Vec<MatchDoc> {
        vec![
            make_match(1, "Chennai Super Kings", "Mumbai Indians"),
            make_match(2, "Royal Challengers Bengaluru", "Punjab Kings"),
            make_match(3, "Chennai Super Kings", "Gujarat Titans"),
            make_match(4, "Delhi Capitals", "Kolkata Knight Riders"),
            make_match(5, "Mumbai Indians", "Chennai Super Kings"),
            make_match(6, "Sunrisers Hyderabad", "Rajasthan Royals"),
            make_match(7, "Lucknow Super Giants", "Chennai Super Kings"),
            make_match(8, "Punjab Kings", "Delhi Capitals"),
        ]
    }

    fn engine_with_season() -> SearchEngine<StubEmbedder, MemoryStore> {
        let mut engine = SearchEngine::new(StubEmbedder, MemoryStore::new());
        engine.index(&season()).unwrap();
        engine
    }

    #[test]
    fn test_team_history_returns_every_match_uncapped() {
        let mut engine = engine_with_season();

        // k far below the team's match count: history mode ignores it
        let retrieval = engine
            .retrieve("How many matches did CSK win?", 2)
            .unwrap();

        assert_eq!(
            retrieval.mode,
            RouteMode::TeamHistory {
                team: "Chennai Super Kings".to_string()
            }
        );
        assert_eq!(retrieval.docs.len(), 4);
        for doc in &retrieval.docs {
            assert!(doc.metadata.involves("Chennai Super Kings"));
        }
    }

    #[test]
    fn test_performance_keyword_outranks_matchup() {
        let mut engine = engine_with_season();

        // Two teams plus a performance keyword: history for the first team
        let retrieval = engine.retrieve("Did CSK win against MI?", 20).unwrap();

        assert_eq!(
            retrieval.mode,
            RouteMode::TeamHistory {
                team: "Chennai Super Kings".to_string()
            }
        );
    }

    #[test]
    fn test_single_team_without_performance_keyword_is_semantic() {
        let mut engine = engine_with_season();

        let retrieval = engine.retrieve("Tell me about CSK", 20).unwrap();

        assert_eq!(retrieval.mode, RouteMode::Semantic);
    }

    #[test]
    fn test_matchup_mode_exact_pair_first_then_dedup() {
        let mut engine = engine_with_season();

        let retrieval = engine.retrieve("CSK vs MI head to head", 20).unwrap();

        assert_eq!(
            retrieval.mode,
            RouteMode::Matchup {
                team1: "Chennai Super Kings".to_string(),
                team2: "Mumbai Indians".to_string(),
            }
        );

        // Both pairing matches lead the results, in either home/away order
        assert!(retrieval.docs.len() >= 2);
        for doc in &retrieval.docs[..2] {
            assert!(doc
                .metadata
                .is_pairing("Chennai Super Kings", "Mumbai Indians"));
        }

        // Semantic fill never reintroduces a match already present
        let keys: Vec<String> = retrieval.docs.iter().map(MatchDoc::dedup_key).collect();
        let distinct: HashSet<&String> = keys.iter().collect();
        assert_eq!(distinct.len(), keys.len());
    }

    #[test]
    fn test_matchup_mode_caps_at_k() {
        let mut engine = engine_with_season();

        let retrieval = engine.retrieve("CSK vs MI head to head", 3).unwrap();

        assert_eq!(retrieval.docs.len(), 3);
        for doc in &retrieval.docs[..2] {
            assert!(doc
                .metadata
                .is_pairing("Chennai Super Kings", "Mumbai Indians"));
        }
    }

    #[test]
    fn test_semantic_mode_for_unrecognized_teams() {
        let mut engine = engine_with_season();

        let retrieval = engine
            .retrieve("Who has the best bowling economy?", 5)
            .unwrap();

        assert_eq!(retrieval.mode, RouteMode::Semantic);
        assert_eq!(retrieval.docs.len(), 5);
    }

    #[test]
    fn test_semantic_k_larger_than_store() {
        let mut engine = engine_with_season();

        let retrieval = engine
            .retrieve("Who has the best bowling economy?", 50)
            .unwrap();

        assert_eq!(retrieval.docs.len(), 8);
    }

    #[test]
    fn test_empty_store_returns_empty_docs() {
        let mut engine = SearchEngine::new(StubEmbedder, MemoryStore::new());

        let retrieval = engine
            .retrieve("How many matches did CSK win?", 20)
            .unwrap();
        assert!(retrieval.docs.is_empty());

        let retrieval = engine.retrieve("anything at bat", 20).unwrap();
        assert!(retrieval.docs.is_empty());
    }

    #[test]
    fn test_dedup_docs_keeps_first_occurrence() {
        let first = make_match(1, "Chennai Super Kings", "Mumbai Indians");
        let mut shadow = make_match(1, "Chennai Super Kings", "Mumbai Indians");
        shadow.content = "a different rendering of the same match".to_string();
        let other = make_match(2, "Punjab Kings", "Delhi Capitals");

        let deduped = dedup_docs(vec![first.clone(), shadow, other.clone()]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].content, first.content);
        assert_eq!(deduped[1].metadata.match_number, "2");
    }

    #[test]
    fn test_dedup_prefix_fallback_merges_shared_prefixes() {
        // Without match numbers the key degrades to a 50-char prefix,
        // which merges distinct documents that happen to share one
        let mut a = make_match(0, "A", "B");
        a.metadata.match_number = String::new();
        a.content = format!("{}one", "p".repeat(50));
        let mut b = make_match(0, "C", "D");
        b.metadata.match_number = String::new();
        b.content = format!("{}two", "p".repeat(50));

        let deduped = dedup_docs(vec![a, b]);
        assert_eq!(deduped.len(), 1);
    }

    #[test]
    fn test_is_performance_query() {
        assert!(is_performance_query("how many matches did they play"));
        assert!(is_performance_query("overall season performance"));
        assert!(!is_performance_query("best bowling economy this year"));
    }
}
