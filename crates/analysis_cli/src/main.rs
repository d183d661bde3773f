//! Chess analysis CLI
//!
//! Search a position, build the opening table, run perft, or watch the
//! background analyzer deepen.

mod endpoint;

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chess_core::{Position, START_FEN, perft, perft_divide};
use clap::{Parser, Subcommand};
use minimax_engine::{AnalysisSession, Engine, EngineConfig, OpeningBook};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Best move and value for a position
    Analyze {
        /// FEN, or an endpoint-encoded FEN with --encoded
        #[arg(default_value = START_FEN)]
        fen: String,
        #[arg(short, long)]
        depth: Option<u8>,
        /// FEN uses `=` for `/` and `%20` for spaces
        #[arg(long)]
        encoded: bool,
        /// Print the endpoint response array
        #[arg(long)]
        json: bool,
    },
    /// Search every FEN in a file and write the opening table
    BuildBook {
        /// One FEN per line; blank lines and `#` comments are skipped
        #[arg(long)]
        fens: PathBuf,
        #[arg(short, long, default_value_t = 3)]
        depth: u8,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        #[arg(default_value = START_FEN)]
        fen: String,
        #[arg(short, long, default_value_t = 4)]
        depth: u8,
        /// Per-move breakdown
        #[arg(long)]
        divide: bool,
    },
    /// Run the background analyzer and print each completed depth
    Watch {
        #[arg(default_value = START_FEN)]
        fen: String,
        #[arg(short, long, default_value_t = 10)]
        seconds: u64,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Analyze {
            fen,
            depth,
            encoded,
            json,
        } => {
            let fen = if encoded { endpoint::decode_fen(&fen) } else { fen };
            let engine = Engine::from_config(config)?;
            let depth = depth.unwrap_or(engine.config().depth);
            let result = engine
                .analyze_fen(&fen, depth)
                .with_context(|| format!("analyzing '{fen}'"))?;
            if json {
                println!("{}", endpoint::response(&result));
            } else {
                let best = result
                    .best_move
                    .map_or_else(|| "(none)".to_string(), |m| m.to_string());
                println!("bestmove {best}");
                println!("score    {}", result.score);
                println!("depth    {}", result.depth);
                println!("nodes    {}", result.nodes);
                if result.from_book {
                    println!("source   opening table");
                }
            }
        }
        Command::BuildBook { fens, depth, out } => {
            let text = fs::read_to_string(&fens)
                .with_context(|| format!("reading {}", fens.display()))?;
            let positions = text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(|line| {
                    Position::from_fen(line).with_context(|| format!("invalid FEN '{line}'"))
                })
                .collect::<Result<Vec<_>>>()?;
            info!(positions = positions.len(), depth, "building opening table");
            let started = Instant::now();
            let book = OpeningBook::build(positions, depth, config.eval_cache_capacity);
            book.save(&out)?;
            println!(
                "wrote {} entries to {} in {:.1}s",
                book.len(),
                out.display(),
                started.elapsed().as_secs_f64()
            );
        }
        Command::Perft { fen, depth, divide } => {
            let pos = Position::from_fen(&fen).with_context(|| format!("invalid FEN '{fen}'"))?;
            let started = Instant::now();
            let total: u64 = if divide {
                let split = perft_divide(&pos, depth);
                for (mv, nodes) in &split {
                    println!("{mv}: {nodes}");
                }
                split.iter().map(|(_, n)| n).sum()
            } else {
                perft(&pos, depth)
            };
            let secs = started.elapsed().as_secs_f64();
            let nps = total as f64 / secs.max(1e-9);
            println!("perft({depth}) = {total}  [{secs:.2}s, {nps:.0} nps]");
        }
        Command::Watch { fen, seconds } => {
            let pos = Position::from_fen(&fen).with_context(|| format!("invalid FEN '{fen}'"))?;
            let mut session = AnalysisSession::new(Engine::from_config(config)?);
            session.start(&pos);
            let deadline = Instant::now() + Duration::from_secs(seconds);
            let mut shown = 0u8;
            while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
                let report = session.wait_for_depth(shown.saturating_add(1), remaining);
                if let Some(report) = report.filter(|r| r.depth > shown) {
                    shown = report.depth;
                    let best = report
                        .best_move
                        .map_or_else(|| "(none)".to_string(), |m| m.to_string());
                    println!("depth {:>2}  score {:>8}  best {best}", report.depth, report.score);
                }
                if !session.is_running() {
                    break;
                }
            }
            session.stop();
            println!("status: {:?}", session.status());
        }
    }
    Ok(())
}
