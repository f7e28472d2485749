use crate::model::modifiers::ModifierSet;
use crate::model::player::Side;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Classic,
    Roguelike,
    Dungeon,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Roguelike, GameMode::Dungeon];

    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Roguelike => "roguelike",
            GameMode::Dungeon => "dungeon",
        }
    }

    /// Rules a fresh round of this mode starts with. Dungeon rooms force
    /// every element active; roguelike leaves activation to the player.
    pub const fn default_modifiers(self) -> ModifierSet {
        match self {
            GameMode::Classic => ModifierSet::CLASSIC,
            GameMode::Roguelike => ModifierSet::CLASSIC
                .with_elemental_clash(true)
                .with_temporary_briscola(true),
            GameMode::Dungeon => ModifierSet::CLASSIC
                .with_elemental_clash(true)
                .with_temporary_briscola(true)
                .with_forced_elements(true),
        }
    }

    pub const fn uses_elements(self) -> bool {
        !matches!(self, GameMode::Classic)
    }

    /// Classic always opens with the human; the other modes draw lots.
    pub fn first_leader<R: Rng + ?Sized>(self, rng: &mut R) -> Side {
        match self {
            GameMode::Classic => Side::Human,
            GameMode::Roguelike | GameMode::Dungeon => {
                if rng.gen_bool(0.5) {
                    Side::Human
                } else {
                    Side::Ai
                }
            }
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game mode '{0}'")]
pub struct UnknownMode(pub String);

impl FromStr for GameMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "roguelike" => Ok(GameMode::Roguelike),
            "dungeon" => Ok(GameMode::Dungeon),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}
