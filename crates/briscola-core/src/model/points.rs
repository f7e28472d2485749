use crate::model::card::Card;
use crate::model::rank::Rank;
use serde::{Deserialize, Serialize};

/// Points in a full deck under either table.
pub const DECK_POINTS: u32 = 120;

/// Score needed to win outright when the deck holds [`DECK_POINTS`].
pub const HALF_POINTS: u32 = DECK_POINTS / 2;

/// Complete rank-to-points mapping. Value inversion swaps the whole table
/// rather than patching entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointTable {
    #[default]
    Standard,
    Inverted,
}

impl PointTable {
    pub const fn points(self, rank: Rank) -> u32 {
        match self {
            PointTable::Standard => match rank {
                Rank::Asso => 11,
                Rank::Three => 10,
                Rank::Re => 4,
                Rank::Cavallo => 3,
                Rank::Fante => 2,
                Rank::Seven | Rank::Six | Rank::Five | Rank::Four | Rank::Two => 0,
            },
            PointTable::Inverted => match rank {
                Rank::Asso | Rank::Three | Rank::Re | Rank::Cavallo | Rank::Fante => 0,
                Rank::Seven => 2,
                Rank::Six => 3,
                Rank::Five => 4,
                Rank::Four => 10,
                Rank::Two => 11,
            },
        }
    }

    /// Points a card is worth on the table. Burned cards are worth nothing.
    pub const fn card_points(self, card: Card) -> u32 {
        if card.is_burned() {
            0
        } else {
            self.points(card.rank)
        }
    }
}

/// Points of `card` under the standard table.
pub const fn card_points(card: Card) -> u32 {
    PointTable::Standard.card_points(card)
}

/// Trick strength of `card`; status flags never change it.
pub const fn card_rank(card: Card) -> u8 {
    card.rank.strength()
}
