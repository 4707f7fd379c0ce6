use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use vanishing_tictactoe::{reachable_under_optimal_play, Player, Solver, StateSet};

#[derive(Parser)]
#[command(name = "vanishing_tictactoe")]
#[command(version, about = "Solve vanishing tic-tac-toe and export the solution table", long_about = None)]
struct Cli {
    /// Where to write the table
    #[arg(short, long, default_value = "solution.json")]
    output: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Only export positions this side can face while playing optimally
    /// (`both`: positions either side can face)
    #[arg(short, long, value_enum)]
    engine: Option<Side>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Bytes,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    O,
    X,
    Both,
}

impl Side {
    fn engines(self) -> &'static [Player] {
        match self {
            Side::O => &[Player::O],
            Side::X => &[Player::X],
            Side::Both => &Player::BOTH,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let now = Instant::now();
    let solver = Solver::new();
    let counts = solver.outcome_counts();
    info!(
        "Solved {} states ({} wins, {} losses, {} draws) in {:?}.",
        solver.state_count(),
        counts.win,
        counts.loss,
        counts.draw,
        now.elapsed()
    );

    let table = match cli.engine {
        None => solver.table(),
        Some(side) => {
            let mut states = StateSet::empty();
            for &engine in side.engines() {
                let pruned = reachable_under_optimal_play(&solver, engine, |_| {})
                    .with_context(|| format!("failed to prune for engine {engine}"))?;
                info!(
                    "Pruned to {} states reachable when {engine} plays optimally.",
                    pruned.len()
                );
                states = states.union(&pruned);
            }
            solver
                .table_for(&states)
                .context("failed to build the pruned table")?
        }
    };

    match cli.format {
        Format::Json => table.write_json(&cli.output),
        Format::Bytes => table.write_bytes(&cli.output),
    }
    .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!(
        "Wrote {} entries to {}.",
        table.len(),
        cli.output.display()
    );

    Ok(())
}
