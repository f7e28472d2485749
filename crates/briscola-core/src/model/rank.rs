use core::fmt;
use serde::{Deserialize, Serialize};

/// The ten ranks of an Italian deck, declared in trick-taking order from
/// weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Fante = 6,
    Cavallo = 7,
    Re = 8,
    Three = 9,
    Asso = 10,
}

impl Rank {
    /// Ranks in printed order (Asso, 2, 3 ... Re). Deck construction walks
    /// this order inside each suit.
    pub const PRINTED: [Rank; 10] = [
        Rank::Asso,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Fante,
        Rank::Cavallo,
        Rank::Re,
    ];

    /// Trick strength: Asso = 10 down to Two = 1.
    pub const fn strength(self) -> u8 {
        self as u8
    }

    pub const fn from_strength(strength: u8) -> Option<Self> {
        match strength {
            1 => Some(Rank::Two),
            2 => Some(Rank::Four),
            3 => Some(Rank::Five),
            4 => Some(Rank::Six),
            5 => Some(Rank::Seven),
            6 => Some(Rank::Fante),
            7 => Some(Rank::Cavallo),
            8 => Some(Rank::Re),
            9 => Some(Rank::Three),
            10 => Some(Rank::Asso),
            _ => None,
        }
    }

    pub const fn is_face(self) -> bool {
        matches!(self, Rank::Fante | Rank::Cavallo | Rank::Re)
    }

    /// Position of this rank in [`Rank::PRINTED`].
    pub const fn printed_index(self) -> usize {
        match self {
            Rank::Asso => 0,
            Rank::Two => 1,
            Rank::Three => 2,
            Rank::Four => 3,
            Rank::Five => 4,
            Rank::Six => 5,
            Rank::Seven => 6,
            Rank::Fante => 7,
            Rank::Cavallo => 8,
            Rank::Re => 9,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Asso => "Asso",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Fante => "Fante",
            Rank::Cavallo => "Cavallo",
            Rank::Re => "Re",
        };
        f.write_str(text)
    }
}
