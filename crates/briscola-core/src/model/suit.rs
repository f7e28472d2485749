use core::fmt;
use serde::{Deserialize, Serialize};

/// The four Italian suits of a 40-card Briscola deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Coppe = 0,
    Denari = 1,
    Spade = 2,
    Bastoni = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Coppe, Suit::Denari, Suit::Spade, Suit::Bastoni];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Coppe),
            1 => Some(Suit::Denari),
            2 => Some(Suit::Spade),
            3 => Some(Suit::Bastoni),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Suit::Coppe => "Coppe",
            Suit::Denari => "Denari",
            Suit::Spade => "Spade",
            Suit::Bastoni => "Bastoni",
        };
        f.write_str(label)
    }
}
