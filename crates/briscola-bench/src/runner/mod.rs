mod summary;

pub use summary::{AgentSummary, RunStats};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use briscola_bot::{BotDifficulty, HeuristicPolicy, Policy, PolicyContext};
use briscola_core::game::match_state::{ChosenPlay, MatchState};
use briscola_core::model::player::Side;
use briscola_core::model::round::{DealError, PlayError, PlayOutcome, RoundPhase, TrickReport};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{AgentConfig, BenchmarkConfig, ResolvedOutputs, ValidationError};

/// Plays a series of bot-vs-bot matches and records them.
pub struct MatchRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: [AgentBlueprint; 2],
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub matches_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub stats: RunStats,
}

impl MatchRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let blueprints = config
            .agents
            .iter()
            .map(AgentBlueprint::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        let found = blueprints.len();
        let agents: [AgentBlueprint; 2] = blueprints
            .try_into()
            .map_err(|_| RunnerError::AgentCount { found })?;

        Ok(Self {
            config,
            outputs,
            agents,
        })
    }

    /// Execute every match, streaming one JSONL row per match to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.matches.seed.unwrap_or(0));
        let mut stats = RunStats::new(self.agents.iter().map(|agent| agent.name.as_str()));
        let mut rows_written = 0usize;

        for match_index in 0..self.config.matches.count {
            let match_seed = rng.next_u64();
            // Alternate seats so neither agent keeps the human side's powers.
            let seating = if match_index % 2 == 0 { [0, 1] } else { [1, 0] };
            let outcome = self.play_match(match_index, match_seed, seating)?;
            stats.record(&outcome);
            write_match_row(&mut writer, &self.config, &outcome)?;
            rows_written += 1;
        }

        writer.flush()?;
        stats.write_markdown(&self.config, &self.outputs.summary_md)?;

        Ok(RunSummary {
            matches_played: self.config.matches.count,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            stats,
        })
    }

    fn play_match(
        &self,
        match_index: usize,
        match_seed: u64,
        seating: [usize; 2],
    ) -> Result<MatchOutcome, RunnerError> {
        let mut state = MatchState::with_options(
            self.config.mode,
            match_seed,
            self.config.effective_modifiers(),
            self.config.reveal_trump,
        )?;
        let mut seats = [
            SeatState::new(&self.agents[seating[0]], seating[0], match_seed),
            SeatState::new(&self.agents[seating[1]], seating[1], match_seed.rotate_left(17)),
        ];
        let mut clashes = 0u32;
        let mut clash_ties = 0u32;
        let mut bonus_entries = 0u32;

        loop {
            if state.is_over() {
                break;
            }
            if state.round().phase() == RoundPhase::Resolving {
                tally_trick(state.complete_trick()?, &mut clashes, &mut clash_ties, &mut bonus_entries);
                continue;
            }

            let side = state.round().turn();
            let seat = &mut seats[side.index()];
            let start = Instant::now();
            let choice = seat
                .policy
                .choose_play(&PolicyContext::new(side, state.round()))
                .ok_or_else(|| RunnerError::game(format!("{side} has no card to play")))?;
            seat.metrics.record(start.elapsed());
            let choice = seat.restrict(choice);

            if state.play(side, choice)? == PlayOutcome::TrickReady {
                tally_trick(state.complete_trick()?, &mut clashes, &mut clash_ties, &mut bonus_entries);
            }
        }

        let result = state
            .result()
            .ok_or_else(|| RunnerError::game("round ended without a result".to_string()))?;
        let winner = result
            .winner
            .map(|side| seats[side.index()].agent_name.clone());

        event!(
            target: "briscola_bench::run",
            Level::INFO,
            run_id = %self.config.run_id,
            match_index = match_index as u64,
            human = %seats[0].agent_name,
            ai = %seats[1].agent_name,
            human_score = result.human_score,
            ai_score = result.ai_score,
            clashes,
        );

        Ok(MatchOutcome {
            match_index,
            match_seed,
            seats: seats.map(|seat| SeatResult {
                agent_index: seat.agent_index,
                agent_name: seat.agent_name,
                decisions: seat.metrics.decisions,
                total: seat.metrics.total,
            }),
            scores: [result.human_score, result.ai_score],
            winner,
            tricks: state.round().trick_counter(),
            clashes,
            clash_ties,
            bonus_entries,
        })
    }
}

fn tally_trick(report: TrickReport, clashes: &mut u32, ties: &mut u32, bonuses: &mut u32) {
    if let TrickReport::Applied(summary) = report {
        if let Some(clash) = summary.resolution.clash {
            *clashes += 1;
            if clash.is_tie() {
                *ties += 1;
            }
        }
        *bonuses += summary.resolution.bonuses.len() as u32;
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_match_row(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    outcome: &MatchOutcome,
) -> Result<(), RunnerError> {
    let row = MatchLogRow {
        run_id: config.run_id.clone(),
        match_id: format!("M{:05}", outcome.match_index),
        match_index: outcome.match_index,
        match_seed: outcome.match_seed,
        mode: config.mode.as_str(),
        human_agent: outcome.seats[Side::Human.index()].agent_name.clone(),
        ai_agent: outcome.seats[Side::Ai.index()].agent_name.clone(),
        human_score: outcome.scores[Side::Human.index()],
        ai_score: outcome.scores[Side::Ai.index()],
        winner: outcome.winner.clone(),
        tricks: outcome.tricks,
        clashes: outcome.clashes,
        clash_ties: outcome.clash_ties,
        bonus_entries: outcome.bonus_entries,
    };
    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[derive(Debug, Clone)]
struct AgentBlueprint {
    name: String,
    difficulty: BotDifficulty,
    activate_elements: bool,
}

impl AgentBlueprint {
    fn from_config(config: &AgentConfig) -> Result<Self, RunnerError> {
        Ok(Self {
            name: config.name.clone(),
            difficulty: config.parsed_difficulty()?,
            activate_elements: config.activate_elements,
        })
    }

    fn spawn_policy(&self, seed: u64) -> Box<dyn Policy> {
        Box::new(HeuristicPolicy::new(self.difficulty, seed))
    }
}

struct SeatState {
    agent_index: usize,
    agent_name: String,
    activate_elements: bool,
    policy: Box<dyn Policy>,
    metrics: DecisionMetrics,
}

impl SeatState {
    fn new(agent: &AgentBlueprint, agent_index: usize, seed: u64) -> Self {
        Self {
            agent_index,
            agent_name: agent.name.clone(),
            activate_elements: agent.activate_elements,
            policy: agent.spawn_policy(seed),
            metrics: DecisionMetrics::default(),
        }
    }

    fn restrict(&self, mut choice: ChosenPlay) -> ChosenPlay {
        choice.activate_element &= self.activate_elements;
        choice
    }
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    decisions: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration) {
        self.total += duration;
        self.decisions += 1;
    }
}

pub struct SeatResult {
    pub agent_index: usize,
    pub agent_name: String,
    pub decisions: u32,
    pub total: Duration,
}

/// One finished match, seats indexed by [`Side::index`].
pub struct MatchOutcome {
    pub match_index: usize,
    pub match_seed: u64,
    pub seats: [SeatResult; 2],
    pub scores: [u32; 2],
    pub winner: Option<String>,
    pub tricks: u32,
    pub clashes: u32,
    pub clash_ties: u32,
    pub bonus_entries: u32,
}

#[derive(Serialize)]
struct MatchLogRow {
    run_id: String,
    match_id: String,
    match_index: usize,
    match_seed: u64,
    mode: &'static str,
    human_agent: String,
    ai_agent: String,
    human_score: u32,
    ai_score: u32,
    winner: Option<String>,
    tricks: u32,
    clashes: u32,
    clash_ties: u32,
    bonus_entries: u32,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid agent: {0}")]
    Agent(#[from] ValidationError),
    #[error("configuration requires exactly 2 agents but found {found}")]
    AgentCount { found: usize },
    #[error("dealing failed: {0}")]
    Deal(#[from] DealError),
    #[error("illegal play: {0}")]
    Play(#[from] PlayError),
    #[error("game execution failed: {message}")]
    Game { message: String },
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}
