use crate::model::element::Element;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Identity of one physical card. Unique within a 40-card deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(u8);

impl CardId {
    pub const fn of(rank: Rank, suit: Suit) -> Self {
        Self((suit.index() * 10 + rank.printed_index()) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{:02}", self.0)
    }
}

/// Per-round status flags. Flags are never toggled in place on a card that
/// sits in a hand; the owner swaps in a new [`Card`] value instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardStatus {
    #[serde(default)]
    pub burned: bool,
    #[serde(default)]
    pub fortified: bool,
    #[serde(default)]
    pub temporary_briscola: bool,
    #[serde(default)]
    pub cursed: bool,
    #[serde(default)]
    pub element_activated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    pub suit: Suit,
    #[serde(default)]
    pub element: Option<Element>,
    #[serde(default)]
    pub status: CardStatus,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            id: CardId::of(rank, suit),
            rank,
            suit,
            element: None,
            status: CardStatus {
                burned: false,
                fortified: false,
                temporary_briscola: false,
                cursed: false,
                element_activated: false,
            },
        }
    }

    pub const fn strength(self) -> u8 {
        self.rank.strength()
    }

    pub const fn with_element(mut self, element: Option<Element>) -> Self {
        self.element = element;
        self
    }

    pub const fn burned(mut self) -> Self {
        self.status.burned = true;
        self
    }

    pub const fn fortified(mut self) -> Self {
        self.status.fortified = true;
        self
    }

    pub const fn as_temporary_briscola(mut self) -> Self {
        self.status.temporary_briscola = true;
        self
    }

    pub const fn with_curse(mut self, cursed: bool) -> Self {
        self.status.cursed = cursed;
        self
    }

    pub const fn with_activation(mut self, activated: bool) -> Self {
        self.status.element_activated = activated;
        self
    }

    pub const fn is_burned(self) -> bool {
        self.status.burned
    }

    pub const fn is_cursed(self) -> bool {
        self.status.cursed
    }

    /// True when a status flag lets this card stand in for the trump suit.
    pub const fn counts_as_trump(self) -> bool {
        self.status.temporary_briscola || self.status.fortified
    }

    /// Clears the per-trick flags once the card leaves the table.
    pub const fn settled(mut self) -> Self {
        self.status.temporary_briscola = false;
        self.status.fortified = false;
        self.status.element_activated = false;
        self
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} di {}", self.rank, self.suit)?;
        if let Some(element) = self.element {
            write!(f, " [{element}]")?;
        }
        Ok(())
    }
}
