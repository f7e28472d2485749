use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use super::MatchOutcome;
use crate::config::BenchmarkConfig;

/// Aggregated results for one agent across a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentSummary {
    pub name: String,
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub total_points: u64,
    pub decisions: u64,
    pub decision_time: Duration,
}

impl AgentSummary {
    pub fn win_rate(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            self.wins as f64 / self.matches as f64
        }
    }

    pub fn average_points(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            self.total_points as f64 / self.matches as f64
        }
    }

    pub fn average_ms_per_decision(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.decision_time.as_secs_f64() * 1000.0 / self.decisions as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub agents: Vec<AgentSummary>,
    pub clashes: u64,
    pub clash_ties: u64,
    pub bonus_entries: u64,
}

impl RunStats {
    pub(crate) fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            agents: names
                .into_iter()
                .map(|name| AgentSummary {
                    name: name.to_string(),
                    ..AgentSummary::default()
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &MatchOutcome) {
        self.clashes += u64::from(outcome.clashes);
        self.clash_ties += u64::from(outcome.clash_ties);
        self.bonus_entries += u64::from(outcome.bonus_entries);

        for (side_index, seat) in outcome.seats.iter().enumerate() {
            let Some(agent) = self.agents.get_mut(seat.agent_index) else {
                continue;
            };
            agent.matches += 1;
            agent.total_points += u64::from(outcome.scores[side_index]);
            agent.decisions += u64::from(seat.decisions);
            agent.decision_time += seat.total;
            match outcome.winner.as_deref() {
                None => agent.ties += 1,
                Some(name) if name == seat.agent_name => agent.wins += 1,
                Some(_) => agent.losses += 1,
            }
        }
    }

    pub fn write_markdown(&self, config: &BenchmarkConfig, path: impl AsRef<Path>) -> io::Result<()> {
        let mut rows = String::new();
        rows.push_str("# Match Summary\n\n");
        rows.push_str(&format!(
            "Run `{}` in {} mode: {} clashes ({} ties), {} bonus entries\n\n",
            config.run_id, config.mode, self.clashes, self.clash_ties, self.bonus_entries
        ));
        rows.push_str("| Agent | Matches | Wins | Losses | Ties | Win % | Avg points | Avg ms/decision |\n");
        rows.push_str("|-------|---------|------|--------|------|-------|------------|------------------|\n");

        for agent in &self.agents {
            rows.push_str(&format!(
                "| {name} | {matches} | {wins} | {losses} | {ties} | {win:.1}% | {avg:.2} | {latency:.3} |\n",
                name = agent.name,
                matches = agent.matches,
                wins = agent.wins,
                losses = agent.losses,
                ties = agent.ties,
                win = agent.win_rate() * 100.0,
                avg = agent.average_points(),
                latency = agent.average_ms_per_decision(),
            ));
        }

        fs::write(path.as_ref(), rows)
    }
}
