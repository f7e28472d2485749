use std::path::PathBuf;

use briscola_core::game::mode::GameMode;
use clap::Parser;

use briscola_bench::config::{BenchmarkConfig, ResolvedOutputs};
use briscola_bench::logging::init_logging;
use briscola_bench::runner::MatchRunner;

/// Bot-vs-bot match harness for WaifuBriscola.
#[derive(Debug, Parser)]
#[command(
    name = "briscola-bench",
    author,
    version,
    about = "Deterministic Briscola bot-vs-bot harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of matches to play.
    #[arg(long, value_name = "COUNT")]
    matches: Option<usize>,

    /// Override the RNG seed for match generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the game mode (classic, roguelike, dungeon).
    #[arg(long, value_name = "MODE")]
    mode: Option<GameMode>,

    /// Exit after validating the configuration (no matches are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(matches) = cli.matches {
        config.matches.count = matches;
    }

    if let Some(seed) = cli.seed {
        config.matches.seed = Some(seed);
    }

    if let Some(mode) = cli.mode {
        config.mode = mode;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let matches = config.matches.count;

    println!(
        "Loaded configuration '{run_id}': {} vs {} in {} mode ({matches} match{})",
        config.agents[0].name,
        config.agents[1].name,
        config.mode,
        if matches == 1 { "" } else { "es" }
    );

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = MatchRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: match execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} matches → {} rows at {}",
        summary.matches_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    for agent in &summary.stats.agents {
        println!(
            "  {}: {} wins, {} losses, {} ties, {:.2} avg points",
            agent.name,
            agent.wins,
            agent.losses,
            agent.ties,
            agent.average_points()
        );
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
