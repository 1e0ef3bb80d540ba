//! Oracle - command-line driver for the chess rules oracle.
//!
//! Replays moves from a position and reports the outcome, lists legal
//! moves, or runs perft. Set `RUST_LOG=debug` to trace every applied and
//! rejected move.

use std::path::PathBuf;

use anyhow::Context;
use chess_oracle::{perft, perft_divide, Engine, EngineConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oracle")]
#[command(about = "Chess rules oracle: legality, move application and game outcome")]
struct Cli {
    /// TOML file with `start_fen` and `hash_seed`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Start position, overriding the config file
    #[arg(long, global = true)]
    fen: Option<String>,

    /// Zobrist seed, overriding the config file
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play moves in UCI notation and print the resulting position
    Play {
        /// Moves such as e2e4 or e7e8q
        moves: Vec<String>,
    },
    /// List the legal moves of the start position
    Moves,
    /// Count leaf nodes of the legal-move tree
    Perft {
        depth: u32,
        /// Print the count below each root move
        #[arg(short, long)]
        divide: bool,
    },
}

impl Cli {
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(fen) = &self.fen {
            config.start_fen = fen.clone();
        }
        if let Some(seed) = self.seed {
            config.hash_seed = Some(seed);
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.engine_config()?;
    tracing::debug!(start_fen = %config.start_fen, hash_seed = ?config.hash_seed, "configured");
    let mut engine = Engine::from_config(&config)
        .with_context(|| format!("invalid start position {:?}", config.start_fen))?;

    match cli.command {
        Commands::Play { moves } => {
            for (ply, text) in moves.iter().enumerate() {
                engine
                    .act(text)
                    .with_context(|| format!("move {} ({text})", ply + 1))?;
            }
            println!("{}", engine.to_fen());
            println!("{}", engine.status());
        }
        Commands::Moves => {
            for mv in engine.legal_moves().iter() {
                println!("{mv}");
            }
            println!("{}", engine.status());
        }
        Commands::Perft { depth, divide } => {
            if divide {
                let results = perft_divide(engine.board(), depth);
                for (mv, nodes) in &results {
                    println!("{mv}: {nodes}");
                }
                let total: u64 = results.iter().map(|(_, nodes)| nodes).sum();
                println!("\nNodes: {total}");
            } else {
                println!("Nodes: {}", perft(engine.board(), depth));
            }
        }
    }

    Ok(())
}
