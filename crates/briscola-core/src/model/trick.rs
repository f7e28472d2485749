use crate::model::card::{Card, CardId};
use crate::model::player::Side;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cards currently on the table: zero, one (lead) or two (lead + follow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: Side,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub side: Side,
    pub card: Card,
}

/// Identity of a physical trick: its two card ids in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrickKey(CardId, CardId);

impl TrickKey {
    pub fn new(a: CardId, b: CardId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn ids(self) -> (CardId, CardId) {
        (self.0, self.1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already has two cards")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn { expected: Side, actual: Side },
    #[error("card {0} is already on the table")]
    DuplicateCard(CardId),
}

impl Trick {
    pub fn new(leader: Side) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(2),
        }
    }

    pub fn leader(&self) -> Side {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 2
    }

    pub fn lead(&self) -> Option<Card> {
        self.plays.first().map(|play| play.card)
    }

    pub fn follow(&self) -> Option<Card> {
        self.plays.get(1).map(|play| play.card)
    }

    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|play| play.card).collect()
    }

    pub fn key(&self) -> Option<TrickKey> {
        match self.plays.as_slice() {
            [lead, follow] => Some(TrickKey::new(lead.card.id, follow.card.id)),
            _ => None,
        }
    }

    /// Side expected to put down the next card, if the trick is open.
    pub fn expected_side(&self) -> Option<Side> {
        match self.plays.len() {
            0 => Some(self.leader),
            1 => Some(self.leader.opponent()),
            _ => None,
        }
    }

    pub fn play(&mut self, side: Side, card: Card) -> Result<(), TrickError> {
        let expected = self.expected_side().ok_or(TrickError::TrickComplete)?;
        if expected != side {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: side,
            });
        }
        if self.plays.iter().any(|play| play.card.id == card.id) {
            return Err(TrickError::DuplicateCard(card.id));
        }
        self.plays.push(Play { side, card });
        Ok(())
    }
}
