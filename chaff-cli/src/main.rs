use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chaff::fuzzy::FuzzyConfig;
use chaff::minhash::calculate_minhash_params;

#[derive(Parser)]
#[command(name = "chaff")]
#[command(about = "Exact and near-duplicate removal for text corpora", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drop every line that occurs more than once anywhere in the batch
    Exact {
        /// Directory receiving one filtered file per input
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Input files; missing paths are skipped
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Keep one representative per cluster of near-duplicate documents
    Fuzzy {
        /// Directory receiving the surviving documents
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Number of hash functions (signature length)
        #[arg(long, default_value = "128")]
        num_hashes: usize,

        /// Number of LSH bands; 0 derives bands and width from the threshold
        #[arg(long, default_value = "16")]
        num_bands: usize,

        /// Word n-gram size
        #[arg(long, default_value = "4")]
        ngram_size: usize,

        /// Jaccard similarity threshold in [0, 1]
        #[arg(long, default_value = "0.8")]
        threshold: f64,

        /// Seed for representative selection
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Input files; missing paths are skipped
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Exact { output_dir, inputs } => {
            let stats = chaff::exact::dedup_exact(&inputs, &output_dir)?;
            println!(
                "{} files: kept {} of {} lines",
                stats.files, stats.lines_written, stats.lines_read
            );
        }
        Command::Fuzzy {
            output_dir,
            num_hashes,
            num_bands,
            ngram_size,
            threshold,
            seed,
            inputs,
        } => {
            let (num_bands, num_hashes) = if num_bands == 0 {
                let (bands, band_width) = calculate_minhash_params(threshold, num_hashes);
                tracing::info!(bands, band_width, "derived banding from threshold");
                (bands, bands * band_width)
            } else {
                (num_bands, num_hashes)
            };
            let config = FuzzyConfig {
                num_hashes,
                num_bands,
                ngram_size,
                jaccard_threshold: threshold,
                seed,
            };
            let stats = chaff::fuzzy::dedup_fuzzy(&inputs, &config, &output_dir)?;
            println!(
                "{} documents in {} clusters: dropped {} near-duplicates",
                stats.documents, stats.clusters, stats.duplicates_dropped
            );
        }
    }
    Ok(())
}
