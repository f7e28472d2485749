use super::ResolveError;
use crate::model::card::Card;
use crate::model::element::{Advantage, Element};
use crate::model::player::Side;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DIE_FACES: u8 = 100;

/// Result of comparing the two activated elements of a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClashOutcome {
    /// One element beats the other in the weakness cycle.
    Weakness {
        winner: Side,
        strong: Element,
        weak: Element,
    },
    /// Neutral pairing settled by a 1..=100 roll per side. Equal rolls tie.
    Dice { human_roll: u8, ai_roll: u8 },
    /// An external ability fixed the winner.
    Override { winner: Side },
}

impl ClashOutcome {
    /// Clash winner, or `None` on a dice tie.
    pub fn winner(&self) -> Option<Side> {
        match *self {
            ClashOutcome::Weakness { winner, .. } | ClashOutcome::Override { winner } => {
                Some(winner)
            }
            ClashOutcome::Dice {
                human_roll,
                ai_roll,
            } => match human_roll.cmp(&ai_roll) {
                std::cmp::Ordering::Greater => Some(Side::Human),
                std::cmp::Ordering::Less => Some(Side::Ai),
                std::cmp::Ordering::Equal => None,
            },
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winner().is_none()
    }
}

/// Compares the human's and the AI's elemental cards.
///
/// Both cards must carry an element. The dice are only consulted for
/// neutral pairings without an override, human first.
pub fn resolve_clash<R: Rng + ?Sized>(
    human: Card,
    ai: Card,
    guaranteed_winner: Option<Side>,
    rng: &mut R,
) -> Result<ClashOutcome, ResolveError> {
    let human_element = human.element.ok_or(ResolveError::MissingElement(human.id))?;
    let ai_element = ai.element.ok_or(ResolveError::MissingElement(ai.id))?;

    let outcome = match human_element.advantage_over(ai_element) {
        Advantage::Strong => ClashOutcome::Weakness {
            winner: Side::Human,
            strong: human_element,
            weak: ai_element,
        },
        Advantage::Weak => ClashOutcome::Weakness {
            winner: Side::Ai,
            strong: ai_element,
            weak: human_element,
        },
        Advantage::Neutral => match guaranteed_winner {
            Some(winner) => ClashOutcome::Override { winner },
            None => {
                let human_roll = rng.gen_range(1..=DIE_FACES);
                let ai_roll = rng.gen_range(1..=DIE_FACES);
                ClashOutcome::Dice {
                    human_roll,
                    ai_roll,
                }
            }
        },
    };
    Ok(outcome)
}
