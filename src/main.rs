//! offline-layout CLI - inspect checkpoint directories and snapshot files.
//!
//! Running layouts is a library concern (the stepping engine is supplied by
//! the caller as a trait implementation); this binary covers the on-disk
//! side: how far a run got, and what a snapshot contains.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use offline_layout::codec::{decode_position, Dimensionality};
use offline_layout::store::CheckpointStore;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "offline-layout")]
#[command(version)]
#[command(about = "Inspect checkpointed graph layout runs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the last completed iteration and the snapshot files in a
    /// checkpoint directory
    Status {
        /// Checkpoint directory
        #[arg(short, long, default_value = "./data")]
        dir: PathBuf,
    },

    /// Decode a snapshot file and print one position per line
    Dump {
        /// Snapshot file (`<iteration>.bin` or `positions.bin`)
        file: PathBuf,

        /// Decode 8-byte two-coordinate records instead of 12-byte
        /// three-coordinate ones
        #[arg(long)]
        two_dimensional: bool,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Status { dir } => {
            let store = CheckpointStore::open(&dir)
                .with_context(|| format!("Failed to open checkpoint dir {}", dir.display()))?;
            let latest = store.latest_iteration()?;

            info!(dir = %dir.display(), latest_iteration = latest, "Checkpoint status");

            let mut files: Vec<(String, u64)> = std::fs::read_dir(&dir)
                .with_context(|| format!("Failed to list {}", dir.display()))?
                .filter_map(|e| e.ok())
                .filter_map(|e| {
                    let name = e.file_name().to_string_lossy().into_owned();
                    let size = e.metadata().ok()?.len();
                    name.ends_with(".bin").then_some((name, size))
                })
                .collect();
            files.sort();

            println!("Latest completed iteration: {latest}");
            for (name, size) in files {
                println!("  {name:<16} {size} bytes");
            }
        }

        Commands::Dump {
            file,
            two_dimensional,
        } => {
            let dim = if two_dimensional {
                Dimensionality::Two
            } else {
                Dimensionality::Three
            };

            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read snapshot {}", file.display()))?;
            let width = dim.record_width();
            if bytes.len() % width != 0 {
                bail!(
                    "Snapshot size mismatch: {} is {} bytes, not a multiple of the {width}-byte record width",
                    file.display(),
                    bytes.len()
                );
            }

            for (index, offset) in (0..bytes.len()).step_by(width).enumerate() {
                let p = decode_position(&bytes, offset, dim);
                match dim {
                    Dimensionality::Two => println!("{index} {} {}", p.x, p.y),
                    Dimensionality::Three => println!("{index} {} {} {}", p.x, p.y, p.z),
                }
            }
        }
    }

    Ok(())
}
