use crate::model::player::Side;
use crate::model::points::HALF_POINTS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    totals: [u32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 2] }
    }

    pub const fn from_totals(totals: [u32; 2]) -> Self {
        Self { totals }
    }

    pub fn add(&mut self, side: Side, points: u32) {
        self.totals[side.index()] += points;
    }

    pub fn score(&self, side: Side) -> u32 {
        self.totals[side.index()]
    }

    pub fn totals(&self) -> [u32; 2] {
        self.totals
    }

    pub fn combined(&self) -> u32 {
        self.totals.iter().sum()
    }

    /// Strictly higher score wins, equal scores tie. With the standard
    /// table this is "more than 60"; bonus-heavy modifiers can push both
    /// sides past 60, and the comparison still holds.
    pub fn leader(&self) -> Option<Side> {
        let human = self.score(Side::Human);
        let ai = self.score(Side::Ai);
        match human.cmp(&ai) {
            std::cmp::Ordering::Greater => Some(Side::Human),
            std::cmp::Ordering::Less => Some(Side::Ai),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Terminal result handed to reward computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// `None` on a tie.
    pub winner: Option<Side>,
    pub human_score: u32,
    pub ai_score: u32,
}

impl RoundResult {
    pub fn from_scores(scores: &ScoreBoard) -> Self {
        Self {
            winner: scores.leader(),
            human_score: scores.score(Side::Human),
            ai_score: scores.score(Side::Ai),
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }

    pub fn margin(&self) -> u32 {
        self.human_score.abs_diff(self.ai_score)
    }

    /// Whether the winner cleared half of a standard deck.
    pub fn is_outright(&self) -> bool {
        match self.winner {
            Some(Side::Human) => self.human_score > HALF_POINTS,
            Some(Side::Ai) => self.ai_score > HALF_POINTS,
            None => false,
        }
    }
}
