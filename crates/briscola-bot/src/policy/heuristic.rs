use super::{Policy, PolicyContext};
use crate::bot::{BotContext, BotDifficulty, PlayPlanner};
use briscola_core::game::match_state::ChosenPlay;
use briscola_core::model::card::Card;
use briscola_core::model::element::Element;
use briscola_core::rules::follow_beats_lead;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{Level, event};

/// Rule-based player wrapping [`PlayPlanner`] with an element activation
/// choice.
pub struct HeuristicPolicy {
    difficulty: BotDifficulty,
    rng: StdRng,
}

impl HeuristicPolicy {
    pub fn new(difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn easy(seed: u64) -> Self {
        Self::new(BotDifficulty::Easy, seed)
    }

    pub fn medium(seed: u64) -> Self {
        Self::new(BotDifficulty::Medium, seed)
    }

    pub fn hard(seed: u64) -> Self {
        Self::new(BotDifficulty::Hard, seed)
    }

    pub fn from_env(seed: u64) -> Self {
        Self::new(BotDifficulty::from_env(), seed)
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }
}

impl Policy for HeuristicPolicy {
    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> Option<ChosenPlay> {
        let bot_ctx = BotContext::from_round(ctx.round, ctx.side, self.difficulty);
        let card = PlayPlanner::choose(&bot_ctx, &mut self.rng)?;
        let activate_element = self.should_activate(&bot_ctx, card);
        log_play_decision(ctx, &bot_ctx, card, activate_element);
        Some(ChosenPlay {
            card: card.id,
            activate_element,
        })
    }
}

impl HeuristicPolicy {
    /// Easy flips a coin and medium always activates. Hard only activates
    /// when the element pays off for the expected trick outcome: fire and
    /// air reward the winner, water and earth soften a loss.
    fn should_activate(&mut self, ctx: &BotContext<'_>, card: Card) -> bool {
        let Some(element) = card.element else {
            return false;
        };
        match self.difficulty {
            BotDifficulty::Easy => self.rng.gen_bool(0.5),
            BotDifficulty::Medium => true,
            BotDifficulty::Hard => {
                let rewards_winner = matches!(element, Element::Fire | Element::Air);
                match ctx.table {
                    None => rewards_winner,
                    Some(opponent) => {
                        let expect_win =
                            follow_beats_lead(opponent, card, ctx.briscola, ctx.honor_status);
                        rewards_winner == expect_win
                    }
                }
            }
        }
    }
}

fn log_play_decision(ctx: &PolicyContext<'_>, bot_ctx: &BotContext<'_>, chosen: Card, activate: bool) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let hand_preview = bot_ctx
        .hand
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(",");

    event!(
        target: "briscola_bot::play",
        Level::DEBUG,
        side = %ctx.side,
        difficulty = %bot_ctx.difficulty,
        leading = bot_ctx.is_leading(),
        hand = %hand_preview,
        chosen = %chosen,
        activate,
        briscola = %bot_ctx.briscola,
    );
}
