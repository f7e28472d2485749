use super::match_state::MatchState;
use super::mode::GameMode;
use crate::model::card::{Card, CardId};
use crate::model::hand::Hand;
use crate::model::modifiers::ModifierSet;
use crate::model::player::Side;
use crate::model::round::{RoundPhase, RoundState};
use crate::model::score::ScoreBoard;
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickKey};
use crate::rules::TrickResolution;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("card {0} appears more than once in the snapshot")]
    DuplicateCard(CardId),
    #[error("{what}: expected {expected}, found {found}")]
    InconsistentCounts {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("phase {phase:?} does not match a table with {cards} card(s)")]
    PhaseMismatch { phase: RoundPhase, cards: usize },
    #[error("{what} is {found} but the table expects {expected}")]
    TurnMismatch {
        what: &'static str,
        expected: Side,
        found: Side,
    },
    #[error("resolved trick {0:?} names cards that are not in a scored pile")]
    UnscoredTrick(TrickKey),
}

/// Complete, self-describing copy of a round. A cached but unapplied
/// resolution is not stored; it is recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub stock: Vec<Card>,
    pub hands: [Vec<Card>; 2],
    pub briscola_card: Option<Card>,
    pub briscola_suit: Suit,
    pub table: Trick,
    pub turn: Side,
    pub trick_starter: Side,
    pub scores: [u32; 2],
    pub piles: [Vec<Card>; 2],
    pub trick_counter: u32,
    #[serde(default)]
    pub history: Vec<TrickResolution>,
    #[serde(default)]
    pub resolved: Vec<TrickKey>,
    #[serde(default)]
    pub modifiers: ModifierSet,
    pub phase: RoundPhase,
}

impl RoundSnapshot {
    pub fn capture(round: &RoundState) -> Self {
        RoundSnapshot {
            stock: round.stock.iter().copied().collect(),
            hands: [
                round.hands[0].cards().to_vec(),
                round.hands[1].cards().to_vec(),
            ],
            briscola_card: round.briscola_card,
            briscola_suit: round.briscola_suit,
            table: round.table.clone(),
            turn: round.turn,
            trick_starter: round.trick_starter,
            scores: round.scores.totals(),
            piles: round.piles.clone(),
            trick_counter: round.trick_counter,
            history: round.history.clone(),
            resolved: round.resolved.iter().copied().collect(),
            modifiers: round.modifiers,
            phase: round.phase,
        }
    }

    pub fn restore(self) -> Result<RoundState, SnapshotError> {
        self.validate()?;
        let [human, ai] = self.hands;
        Ok(RoundState {
            stock: self.stock.into(),
            hands: [Hand::with_cards(human), Hand::with_cards(ai)],
            briscola_card: self.briscola_card,
            briscola_suit: self.briscola_suit,
            table: self.table,
            turn: self.turn,
            trick_starter: self.trick_starter,
            scores: ScoreBoard::from_totals(self.scores),
            piles: self.piles,
            trick_counter: self.trick_counter,
            history: self.history,
            resolved: self.resolved.into_iter().collect::<BTreeSet<_>>(),
            modifiers: self.modifiers,
            pending: None,
            phase: self.phase,
        })
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        let mut seen = HashSet::new();
        let table_cards = self.table.cards();
        let every_card = self
            .stock
            .iter()
            .chain(self.hands.iter().flatten())
            .chain(self.briscola_card.iter())
            .chain(table_cards.iter())
            .chain(self.piles.iter().flatten());
        for card in every_card {
            if !seen.insert(card.id) {
                return Err(SnapshotError::DuplicateCard(card.id));
            }
        }

        let tricks = self.trick_counter as usize;
        let checks = [
            ("scored history", tricks, self.history.len()),
            ("resolved trick keys", tricks, self.resolved.len()),
            (
                "cards in scored piles",
                tricks * 2,
                self.piles.iter().map(Vec::len).sum(),
            ),
        ];
        for (what, expected, found) in checks {
            if expected != found {
                return Err(SnapshotError::InconsistentCounts {
                    what,
                    expected,
                    found,
                });
            }
        }

        let scored: HashSet<CardId> = self.piles.iter().flatten().map(|card| card.id).collect();
        if let Some(key) = self.resolved.iter().find(|key| {
            let (a, b) = key.ids();
            !(scored.contains(&a) && scored.contains(&b))
        }) {
            return Err(SnapshotError::UnscoredTrick(*key));
        }

        self.validate_turn_order()?;

        let on_table = self.table.plays().len();
        let consistent = match self.phase {
            RoundPhase::AwaitingPlay => on_table < 2,
            RoundPhase::Resolving => on_table == 2,
            RoundPhase::RoundOver => on_table == 0,
        };
        if !consistent {
            return Err(SnapshotError::PhaseMismatch {
                phase: self.phase,
                cards: on_table,
            });
        }
        Ok(())
    }

    /// Plays alternate from the table's leader, who is also the trick
    /// starter. `turn` names the next player, or the follower once both
    /// cards are down.
    fn validate_turn_order(&self) -> Result<(), SnapshotError> {
        let leader = self.table.leader();
        let mismatch = |what, expected, found| SnapshotError::TurnMismatch {
            what,
            expected,
            found,
        };
        for (play, expected) in self.table.plays().iter().zip([leader, leader.opponent()]) {
            if play.side != expected {
                return Err(mismatch("table play side", expected, play.side));
            }
        }
        if self.table.plays().len() > 2 {
            return Err(SnapshotError::PhaseMismatch {
                phase: self.phase,
                cards: self.table.plays().len(),
            });
        }
        if self.trick_starter != leader {
            return Err(mismatch("trick_starter", leader, self.trick_starter));
        }
        let expected_turn = self.table.expected_side().unwrap_or(leader.opponent());
        if self.turn != expected_turn {
            return Err(mismatch("turn", expected_turn, self.turn));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub seed: u64,
    #[serde(default)]
    pub mode: GameMode,
    pub round: RoundSnapshot,
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        MatchSnapshot {
            seed: state.seed(),
            mode: state.mode(),
            round: RoundSnapshot::capture(state.round()),
        }
    }

    pub fn restore(self) -> Result<MatchState, SnapshotError> {
        let round = self.round.restore()?;
        Ok(MatchState::from_parts(self.seed, self.mode, round))
    }

    pub fn to_json(state: &MatchState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
