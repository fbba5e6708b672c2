use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use ripple::config::Config;
use ripple::corpus::loader;
use ripple::output;
use ripple::similarity::SimilarityEngine;

/// Ripple: mutual-reinforcement similarity for sentence corpora.
///
/// Computes coupled word-to-word and sentence-to-sentence similarity
/// matrices by propagating scores across the word/sentence bipartite graph.
#[derive(Parser)]
#[command(name = "ripple", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reinforcement iteration and persist the matrices
    Run {
        /// Number of reinforcement passes to perform
        iterations: usize,

        /// Corpus directory (overrides RIPPLE_CORPUS_DIR)
        #[arg(long)]
        corpus_dir: Option<PathBuf>,

        /// Output directory for WSM.txt / SSM.txt (overrides RIPPLE_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Show corpus statistics without running the iteration
    Stats {
        /// Corpus directory (overrides RIPPLE_CORPUS_DIR)
        #[arg(long)]
        corpus_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ripple=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            iterations,
            corpus_dir,
            output_dir,
        } => {
            let config = Config::load()?;
            let corpus_dir = corpus_dir.unwrap_or(config.corpus_dir);
            let output_dir = output_dir.unwrap_or(config.output_dir);

            let corpus = loader::load_dir(&corpus_dir)?;
            println!("All words: {}", corpus.word_count());
            if corpus.is_empty() {
                println!(
                    "{}",
                    "Corpus is empty — the run will produce empty matrices.".yellow()
                );
            }

            let mut engine = SimilarityEngine::new(corpus, iterations)?;
            let summary = engine.run()?;

            std::fs::create_dir_all(&output_dir)?;
            let wsm_path = output_dir.join(output::WSM_FILE);
            let ssm_path = output_dir.join(output::SSM_FILE);
            output::save_matrix(&wsm_path, engine.word_matrix(summary.depth)?)?;
            output::save_matrix(&ssm_path, engine.sentence_matrix(summary.depth)?)?;
            info!(
                wsm = %wsm_path.display(),
                ssm = %ssm_path.display(),
                "matrices persisted"
            );

            output::display_summary(&summary);
            println!(
                "\n{}",
                format!("Matrices saved to: {}", output_dir.display()).bold()
            );
        }

        Commands::Stats { corpus_dir } => {
            let config = Config::load()?;
            let corpus_dir = corpus_dir.unwrap_or(config.corpus_dir);
            let corpus = loader::load_dir(&corpus_dir)?;
            output::display_corpus_stats(&corpus);
        }
    }

    Ok(())
}
