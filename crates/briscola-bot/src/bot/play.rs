use super::{BotContext, BotDifficulty, cheapness_key, rank_key};
use briscola_core::model::card::Card;
use briscola_core::model::suit::Suit;
use briscola_core::rules::follow_beats_lead;
use rand::Rng;
use rand::seq::SliceRandom;

/// Point value from which a trump is too precious to spend on a cheap trick.
const PRECIOUS_TRUMP: u32 = 10;

pub struct PlayPlanner;

impl PlayPlanner {
    /// Picks a card from `ctx.hand`; `None` only for an empty hand.
    pub fn choose<R: Rng + ?Sized>(ctx: &BotContext<'_>, rng: &mut R) -> Option<Card> {
        if ctx.hand.is_empty() {
            return None;
        }
        match ctx.difficulty {
            BotDifficulty::Easy => ctx.hand.choose(rng).copied(),
            BotDifficulty::Medium | BotDifficulty::Hard => match ctx.table {
                None => Self::lead(ctx),
                Some(opponent) => Self::follow(ctx, opponent),
            },
        }
    }

    /// Cheapest non-trump, or the cheapest card when only trumps remain.
    fn lead(ctx: &BotContext<'_>) -> Option<Card> {
        let cheapest_plain = ctx
            .hand
            .iter()
            .copied()
            .filter(|card| !ctx.is_trump(*card))
            .min_by_key(|card| cheapness_key(ctx, *card));
        cheapest_plain.or_else(|| {
            ctx.hand
                .iter()
                .copied()
                .min_by_key(|card| cheapness_key(ctx, *card))
        })
    }

    fn follow(ctx: &BotContext<'_>, opponent: Card) -> Option<Card> {
        let (winners, losers): (Vec<Card>, Vec<Card>) = ctx
            .hand
            .iter()
            .copied()
            .partition(|card| follow_beats_lead(opponent, *card, ctx.briscola, ctx.honor_status));

        let cheapest_loser = losers
            .iter()
            .copied()
            .min_by_key(|card| cheapness_key(ctx, *card));
        let Some(winner) = winners
            .iter()
            .copied()
            .min_by_key(|card| rank_key(ctx, *card))
        else {
            return cheapest_loser;
        };

        if ctx.difficulty == BotDifficulty::Hard && Self::wastes_trump(ctx, winner, opponent) {
            let plain_discard = losers
                .iter()
                .copied()
                .filter(|card| !ctx.is_trump(*card))
                .min_by_key(|card| cheapness_key(ctx, *card));
            if plain_discard.is_some() {
                return plain_discard;
            }
        }
        Some(winner)
    }

    fn wastes_trump(ctx: &BotContext<'_>, winner: Card, opponent: Card) -> bool {
        ctx.is_trump(winner)
            && ctx.points(winner) >= PRECIOUS_TRUMP
            && ctx.points(opponent) < PRECIOUS_TRUMP
    }
}

/// Picks the AI card for `hand` under plain trump rules and the standard
/// point table. `table` is the opponent's card when following.
pub fn select_ai_card<R: Rng + ?Sized>(
    hand: &[Card],
    briscola: Suit,
    table: Option<Card>,
    difficulty: BotDifficulty,
    rng: &mut R,
) -> Option<Card> {
    let ctx = BotContext::new(hand, briscola, table, difficulty);
    PlayPlanner::choose(&ctx, rng)
}
