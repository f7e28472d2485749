mod play;

pub use play::{PlayPlanner, select_ai_card};

use briscola_core::model::card::Card;
use briscola_core::model::player::Side;
use briscola_core::model::points::PointTable;
use briscola_core::model::round::RoundState;
use briscola_core::model::suit::Suit;
use briscola_core::rules::is_briscola;
use std::fmt;
use std::str::FromStr;

pub const DIFFICULTY_ENV: &str = "BRISCOLA_BOT_DIFFICULTY";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BotDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl BotDifficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            BotDifficulty::Easy => "easy",
            BotDifficulty::Medium => "medium",
            BotDifficulty::Hard => "hard",
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    /// Unset or unrecognised values fall back to the default tier.
    pub fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        read(DIFFICULTY_ENV)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BotDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(BotDifficulty::Easy),
            "medium" | "normal" | "default" => Ok(BotDifficulty::Medium),
            "hard" => Ok(BotDifficulty::Hard),
            other => Err(format!("unknown bot difficulty '{other}'")),
        }
    }
}

/// Everything the selector looks at. Built from a round or by hand.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub hand: &'a [Card],
    pub briscola: Suit,
    /// Opponent's card when following; `None` when leading.
    pub table: Option<Card>,
    pub difficulty: BotDifficulty,
    pub point_table: PointTable,
    /// Whether temporary-briscola and fortify flags count as trump.
    pub honor_status: bool,
}

impl<'a> BotContext<'a> {
    pub fn new(
        hand: &'a [Card],
        briscola: Suit,
        table: Option<Card>,
        difficulty: BotDifficulty,
    ) -> Self {
        Self {
            hand,
            briscola,
            table,
            difficulty,
            point_table: PointTable::Standard,
            honor_status: false,
        }
    }

    pub fn from_round(round: &'a RoundState, side: Side, difficulty: BotDifficulty) -> Self {
        let modifiers = round.modifiers();
        Self {
            hand: round.hand(side).cards(),
            briscola: round.briscola_suit(),
            table: round.table().lead(),
            difficulty,
            point_table: modifiers.point_table(),
            honor_status: modifiers.temporary_briscola,
        }
    }

    pub fn is_leading(&self) -> bool {
        self.table.is_none()
    }

    pub fn points(&self, card: Card) -> u32 {
        self.point_table.card_points(card)
    }

    pub fn is_trump(&self, card: Card) -> bool {
        is_briscola(card, self.briscola, self.honor_status)
    }
}

/// Cheapest first: fewest points, then weakest, then lowest id.
pub(crate) fn cheapness_key(ctx: &BotContext<'_>, card: Card) -> (u32, u8, u8) {
    (ctx.points(card), card.strength(), card.id.value())
}

/// Weakest first, then fewest points.
pub(crate) fn rank_key(ctx: &BotContext<'_>, card: Card) -> (u8, u32, u8) {
    (card.strength(), ctx.points(card), card.id.value())
}
