//! PitchSide CLI - question answering over a season of cricket matches
//!
//! # Commands
//!
//! ```bash
//! # Build the vector index from the season CSV (skipped if present)
//! pitchside index --csv ipl_complete_data_2024.csv
//!
//! # One-shot question
//! pitchside ask "How many matches did CSK win?"
//!
//! # Interactive loop (q to quit)
//! pitchside chat
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use pitchside_lib::{
    embed::MxbaiEmbedder,
    generate::{build_prompt, Generator, OllamaGenerator, DEFAULT_MODEL, DEFAULT_OLLAMA_URL},
    ingest,
    search::{Retrieval, RouteMode, SearchEngine, DEFAULT_K},
    store::{DiskStore, VectorStore},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pitchside")]
#[command(about = "Retrieval-augmented Q&A over a cricket season")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the vector index from the season CSV if it does not exist yet
    Index {
        /// CSV file with one row per match
        #[arg(long, default_value = "ipl_complete_data_2024.csv")]
        csv: PathBuf,

        /// Index directory
        #[arg(long, default_value = "pitchside_db")]
        db: PathBuf,
    },

    /// Ask a single question and print the answer
    Ask {
        /// The question to answer
        question: String,

        /// CSV file with one row per match
        #[arg(long, default_value = "ipl_complete_data_2024.csv")]
        csv: PathBuf,

        /// Index directory
        #[arg(long, default_value = "pitchside_db")]
        db: PathBuf,

        /// Result bound for the capped retrieval modes
        #[arg(short, long, default_value_t = DEFAULT_K)]
        k: usize,

        /// Generation model name
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Ollama server URL
        #[arg(long, default_value = DEFAULT_OLLAMA_URL)]
        ollama_url: String,
    },

    /// Interactive question loop; enter q to quit
    Chat {
        /// CSV file with one row per match
        #[arg(long, default_value = "ipl_complete_data_2024.csv")]
        csv: PathBuf,

        /// Index directory
        #[arg(long, default_value = "pitchside_db")]
        db: PathBuf,

        /// Result bound for the capped retrieval modes
        #[arg(short, long, default_value_t = DEFAULT_K)]
        k: usize,

        /// Generation model name
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Ollama server URL
        #[arg(long, default_value = DEFAULT_OLLAMA_URL)]
        ollama_url: String,
    },
}

fn setup_engine(csv: &Path, db: &Path) -> Result<SearchEngine<MxbaiEmbedder, DiskStore>> {
    println!("Loading embedding model (first run downloads ~700MB)...");
    let mut embedder = MxbaiEmbedder::new()?;

    let store = ingest::load_or_build(&mut embedder, csv, db)?;
    println!("Index ready: {} matches", store.len());

    Ok(SearchEngine::new(embedder, store))
}

fn describe_retrieval(retrieval: &Retrieval) {
    match &retrieval.mode {
        RouteMode::TeamHistory { team } => {
            println!("[debug] Detected team performance query for: {team}");
        }
        RouteMode::Matchup { team1, team2 } => {
            println!("[debug] Detected matchup query: {team1} vs {team2}");
        }
        RouteMode::Semantic => {
            println!("[debug] Using semantic search for general query");
        }
    }

    println!("[debug] Retrieved {} matches:", retrieval.docs.len());
    for doc in &retrieval.docs {
        let meta = &doc.metadata;
        let number = if meta.match_number.is_empty() {
            "?"
        } else {
            meta.match_number.as_str()
        };
        println!("  - Match {number}: {}", meta.matchup);
    }
}

async fn answer(
    engine: &mut SearchEngine<MxbaiEmbedder, DiskStore>,
    generator: &OllamaGenerator,
    question: &str,
    k: usize,
) -> Result<()> {
    let retrieval = engine.retrieve(question, k)?;
    if retrieval.docs.is_empty() {
        println!("[error] No relevant data found.");
        return Ok(());
    }

    describe_retrieval(&retrieval);

    let prompt = build_prompt(&retrieval.docs, question);
    let result = generator.generate(&prompt).await?;

    println!("\n[answer]");
    println!("{result}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Index { csv, db } => {
            let existed = DiskStore::exists(&db);
            let engine = setup_engine(&csv, &db)?;
            if existed {
                println!(
                    "Index at '{}' already existed, left untouched ({} matches)",
                    db.display(),
                    engine.len()
                );
            } else {
                println!(
                    "Indexed {} matches into '{}'",
                    engine.len(),
                    db.display()
                );
            }
        }

        Commands::Ask {
            question,
            csv,
            db,
            k,
            model,
            ollama_url,
        } => {
            let mut engine = setup_engine(&csv, &db)?;
            let generator = OllamaGenerator::new(&ollama_url, &model)?;
            answer(&mut engine, &generator, &question, k).await?;
        }

        Commands::Chat {
            csv,
            db,
            k,
            model,
            ollama_url,
        } => {
            let mut engine = setup_engine(&csv, &db)?;
            let generator = OllamaGenerator::new(&ollama_url, &model)?;
            let stdin = io::stdin();

            loop {
                println!("\n\n-------------------------------");
                print!("Ask your IPL question (q to quit): ");
                io::stdout().flush()?;

                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break; // EOF
                }

                let question = line.trim();
                if question.eq_ignore_ascii_case("q") {
                    break;
                }

                answer(&mut engine, &generator, question, k).await?;
            }
        }
    }

    Ok(())
}
