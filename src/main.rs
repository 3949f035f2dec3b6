//! corpus-store CLI application
//!
//! Command-line interface for the corpus-store library.

use anyhow::Context;
use clap::{Parser, Subcommand};
use corpus_store::utils::{format_file_size, truncate_name};
use corpus_store::{Config, CorpusStore};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "corpus-store")]
#[command(about = "Load word corpora into SQLite once and query their word frequencies")]
#[command(version)]
struct Cli {
    /// Database file (created if absent)
    #[arg(short, long, global = true, default_value = "corpus.db")]
    db: PathBuf,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load corpus files, ingesting each one at most once
    Load {
        /// Corpus source file(s)
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Read every stored word into the word cache
    LoadAll,

    /// Word count per corpus
    Frequencies,

    /// Most frequent words across all corpora
    Top {
        /// Number of words to return (defaults to the configured value)
        #[arg(short)]
        k: Option<usize>,
    },

    /// Load every stored word and print it
    Words,

    /// List stored corpora
    List,

    /// Show store statistics
    Stats,

    /// Delete a corpus and its words
    Delete {
        /// Corpus name as it was loaded
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let store = CorpusStore::with_config(&cli.db, config)
        .with_context(|| format!("Failed to open store {}", cli.db.display()))?;

    match cli.command {
        Commands::Load { inputs } => load_command(&store, &inputs, cli.json)?,
        Commands::LoadAll => {
            let count = store.load_all()?;
            if cli.json {
                print_json(&serde_json::json!({ "words": count }))?;
            } else {
                println!("📚 Loaded {} stored words", count);
            }
        }
        Commands::Frequencies => {
            let counts = store.frequency_by_corpus()?;
            if cli.json {
                print_json(&counts)?;
            } else if counts.is_empty() {
                println!("❌ No corpora stored");
            } else {
                for (name, count) in counts {
                    println!("{:<40} {:>10}", truncate_name(&name, 40), count);
                }
            }
        }
        Commands::Top { k } => {
            let k = k.unwrap_or(store.config().query.default_top_k);
            let top = store.top_k_words(k)?;
            if cli.json {
                print_json(&top)?;
            } else {
                println!("📋 Top {} words:", k);
                for (i, entry) in top.iter().enumerate() {
                    println!("{}. {} ({})", i + 1, entry.word, entry.count);
                }
            }
        }
        Commands::Words => {
            store.load_all()?;
            let words = store.current_words();
            if cli.json {
                print_json(&words)?;
            } else {
                for word in words {
                    println!("{}", word);
                }
            }
        }
        Commands::List => {
            let corpora = store.list_corpora()?;
            if cli.json {
                print_json(&corpora)?;
            } else {
                for corpus in corpora {
                    println!("{:>6}  {}", corpus.id, corpus.name);
                }
            }
        }
        Commands::Stats => {
            let stats = store.stats()?;
            if cli.json {
                print_json(&stats)?;
            } else {
                println!("📊 Store: {}", cli.db.display());
                println!("   Corpora: {}", stats.corpus_count);
                println!("   Words: {}", stats.word_count);
                println!("   Distinct words: {}", stats.distinct_words);
                println!("   Size: {}", format_file_size(stats.file_size_bytes));
            }
        }
        Commands::Delete { name } => {
            let deleted = store.delete_corpus(&name)?;
            if cli.json {
                print_json(&serde_json::json!({ "name": name, "deleted": deleted }))?;
            } else if deleted {
                println!("🗑️  Deleted {}", name);
            } else {
                println!("❌ No corpus named {}", name);
            }
        }
    }

    Ok(())
}

fn load_command(store: &CorpusStore, inputs: &[String], json: bool) -> anyhow::Result<()> {
    let mut outcomes = Vec::with_capacity(inputs.len());

    for input in inputs {
        let outcome = store
            .load_corpus(input)
            .with_context(|| format!("Failed to load {}", input))?;

        if !json {
            if outcome.was_ingested() {
                println!("📄 Ingested {} ({} words)", input, outcome.words());
            } else {
                println!("♻️  Already stored: {} ({} words)", input, outcome.words());
            }
        }
        outcomes.push(serde_json::json!({ "name": input, "result": outcome }));
    }

    if json {
        print_json(&outcomes)?;
    } else {
        println!("✅ {} words in cache", store.cached_len());
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
