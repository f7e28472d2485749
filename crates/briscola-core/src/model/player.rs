use core::fmt;
use serde::{Deserialize, Serialize};

/// The two sides of a Briscola table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Side {
    Human = 0,
    Ai = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Human, Side::Ai];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Side::Human),
            1 => Some(Side::Ai),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Ai,
            Side::Ai => Side::Human,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Side::Human => "human",
            Side::Ai => "ai",
        };
        f.write_str(label)
    }
}
