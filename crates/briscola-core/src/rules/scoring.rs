use super::ResolveError;
use super::clash::{ClashOutcome, resolve_clash};
use super::classic::{is_briscola, trick_winner};
use crate::model::card::Card;
use crate::model::element::Element;
use crate::model::modifiers::ModifierSet;
use crate::model::player::Side;
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickKey};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

pub const FIRE_BONUS: u32 = 3;

/// Round facts the scorer needs but does not own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrickContext {
    /// Air cards already in each side's scored pile, by [`Side::index`].
    pub air_collected: [u32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusReason {
    WaterHalving,
    FireBonus,
    AirStack,
    EarthReturn,
    PowerFlat,
    PowerFaceCards,
    PowerBriscola,
}

/// One line of the bonus breakdown: `delta` points for `side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusEntry {
    pub side: Side,
    pub reason: BonusReason,
    pub delta: i32,
}

/// Outcome of one two-card trick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickResolution {
    pub leader: Side,
    pub lead: Card,
    pub follow: Card,
    pub winner: Side,
    /// Sum of both cards under the active point table.
    pub base_points: u32,
    /// Points credited to the winner, bonuses included.
    pub total_points: u32,
    pub bonuses: Vec<BonusEntry>,
    pub clash: Option<ClashOutcome>,
}

impl TrickResolution {
    pub fn loser(&self) -> Side {
        self.winner.opponent()
    }

    pub fn key(&self) -> TrickKey {
        TrickKey::new(self.lead.id, self.follow.id)
    }

    /// Points to add to `side`'s score for this trick.
    pub fn award(&self, side: Side) -> u32 {
        if side == self.winner {
            self.total_points
        } else {
            self.bonuses
                .iter()
                .filter(|entry| entry.side == side)
                .map(|entry| entry.delta.max(0) as u32)
                .sum()
        }
    }

    pub fn card_of(&self, side: Side) -> Card {
        if side == self.leader {
            self.lead
        } else {
            self.follow
        }
    }
}

/// Resolves `trick` with no optional rules. The RNG is never touched.
pub fn resolve_classic(trick: &Trick, briscola: Suit) -> Result<TrickResolution, ResolveError> {
    let mut no_dice = rand::rngs::mock::StepRng::new(0, 0);
    resolve_trick(
        trick,
        briscola,
        &ModifierSet::CLASSIC,
        &TrickContext::default(),
        &mut no_dice,
    )
}

/// Resolves a complete trick under `modifiers`.
///
/// The winner always follows the suit rules (temporary briscola included
/// when enabled). Elemental effects then adjust the points, in order:
/// water, fire, air, earth, and finally the human's passive powers.
pub fn resolve_trick<R: Rng + ?Sized>(
    trick: &Trick,
    briscola: Suit,
    modifiers: &ModifierSet,
    context: &TrickContext,
    rng: &mut R,
) -> Result<TrickResolution, ResolveError> {
    let (lead, follow) = match (trick.lead(), trick.follow()) {
        (Some(lead), Some(follow)) => (lead, follow),
        _ => {
            return Err(ResolveError::IncompleteTrick {
                found: trick.plays().len(),
            });
        }
    };
    if lead.id == follow.id {
        return Err(ResolveError::DuplicateCard(lead.id));
    }

    let leader = trick.leader();
    let table = modifiers.point_table();
    let winner = trick_winner(lead, follow, leader, briscola, modifiers.temporary_briscola);
    let loser = winner.opponent();
    let card_of = |side: Side| if side == leader { lead } else { follow };

    let base_points = table.card_points(lead) + table.card_points(follow);
    let mut bonuses = Vec::new();
    let mut winner_points = base_points;

    let gate = ElementGate::open(lead, follow, leader, modifiers, rng)?;
    let clash = gate.clash;
    let element_for = |side: Side| {
        if gate.won_or_uncontested(side) {
            card_of(side).element
        } else {
            None
        }
    };

    // Water only ever cuts the opponent's pot.
    if gate.water_applies(loser, card_of(loser)) {
        let other_points = table.card_points(card_of(winner));
        let reduction = other_points.div_ceil(2).min(other_points);
        if reduction > 0 {
            winner_points = winner_points.saturating_sub(reduction);
            bonuses.push(BonusEntry {
                side: winner,
                reason: BonusReason::WaterHalving,
                delta: -(reduction as i32),
            });
        }
    }

    if element_for(winner) == Some(Element::Fire) {
        winner_points += FIRE_BONUS;
        bonuses.push(BonusEntry {
            side: winner,
            reason: BonusReason::FireBonus,
            delta: FIRE_BONUS as i32,
        });
    }

    if element_for(winner) == Some(Element::Air) {
        let stacked = context.air_collected[winner.index()];
        if stacked > 0 {
            winner_points += stacked;
            bonuses.push(BonusEntry {
                side: winner,
                reason: BonusReason::AirStack,
                delta: stacked as i32,
            });
        }
    }

    if element_for(loser) == Some(Element::Earth) {
        let returned = table.card_points(card_of(loser));
        if returned > 0 {
            bonuses.push(BonusEntry {
                side: loser,
                reason: BonusReason::EarthReturn,
                delta: returned as i32,
            });
        }
    }

    if winner == Side::Human {
        let powers = modifiers.powers;
        let human_card = card_of(Side::Human);
        let mut push_power = |reason: BonusReason, amount: u32| {
            if amount > 0 {
                winner_points += amount;
                bonuses.push(BonusEntry {
                    side: Side::Human,
                    reason,
                    delta: amount as i32,
                });
            }
        };
        push_power(BonusReason::PowerFlat, u32::from(powers.flat));
        let faces = [lead, follow].iter().filter(|card| card.rank.is_face()).count() as u32;
        push_power(
            BonusReason::PowerFaceCards,
            u32::from(powers.face_cards) * faces,
        );
        if is_briscola(human_card, briscola, modifiers.temporary_briscola) {
            push_power(BonusReason::PowerBriscola, u32::from(powers.briscola));
        }
    }

    event!(
        target: "briscola_core::rules",
        Level::DEBUG,
        lead = %lead,
        follow = %follow,
        leader = %leader,
        winner = %winner,
        base_points,
        total_points = winner_points,
        bonuses = bonuses.len(),
        clash = ?clash,
    );

    Ok(TrickResolution {
        leader,
        lead,
        follow,
        winner,
        base_points,
        total_points: winner_points,
        bonuses,
        clash,
    })
}

/// Which sides have an active element, and how their clash went.
///
/// Fire, air and earth need the side to have won the clash, or to hold the
/// only active element. Water needs the side not to have won the clash and
/// only applies for the trick's loser.
#[derive(Debug, Clone, Copy)]
struct ElementGate {
    active: [bool; 2],
    clash: Option<ClashOutcome>,
}

impl ElementGate {
    fn open<R: Rng + ?Sized>(
        lead: Card,
        follow: Card,
        leader: Side,
        modifiers: &ModifierSet,
        rng: &mut R,
    ) -> Result<Self, ResolveError> {
        if !modifiers.elemental_clash || (lead.element.is_none() && follow.element.is_none()) {
            return Ok(Self {
                active: [false; 2],
                clash: None,
            });
        }

        let is_active = |card: Card| {
            card.element.is_some()
                && (modifiers.force_elements_active || card.status.element_activated)
        };
        let (human_card, ai_card) = match leader {
            Side::Human => (lead, follow),
            Side::Ai => (follow, lead),
        };
        let active = [is_active(human_card), is_active(ai_card)];

        let clash = if active.iter().all(|a| *a) {
            Some(resolve_clash(
                human_card,
                ai_card,
                modifiers.guaranteed_clash_winner,
                rng,
            )?)
        } else {
            None
        };
        Ok(Self { active, clash })
    }

    fn won_or_uncontested(&self, side: Side) -> bool {
        self.active[side.index()]
            && self
                .clash
                .is_none_or(|outcome| outcome.winner() == Some(side))
    }

    fn water_applies(&self, loser: Side, card: Card) -> bool {
        card.element == Some(Element::Water)
            && self.active[loser.index()]
            && self
                .clash
                .is_none_or(|outcome| outcome.winner() != Some(loser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::modifiers::PowerLevels;
    use crate::model::rank::Rank;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TRUMP: Suit = Suit::Bastoni;

    fn trick(leader: Side, lead: Card, follow: Card) -> Trick {
        let mut trick = Trick::new(leader);
        trick.play(leader, lead).unwrap();
        trick.play(leader.opponent(), follow).unwrap();
        trick
    }

    fn elemental(rank: Rank, suit: Suit, element: Element) -> Card {
        Card::new(rank, suit)
            .with_element(Some(element))
            .with_activation(true)
    }

    fn elemental_modifiers() -> ModifierSet {
        ModifierSet::CLASSIC.with_elemental_clash(true)
    }

    fn resolve(trick: &Trick, modifiers: &ModifierSet, context: TrickContext) -> TrickResolution {
        let mut rng = StdRng::seed_from_u64(9);
        resolve_trick(trick, TRUMP, modifiers, &context, &mut rng).unwrap()
    }

    #[test]
    fn classic_points_are_conserved() {
        let t = trick(
            Side::Human,
            Card::new(Rank::Asso, Suit::Coppe),
            Card::new(Rank::Three, Suit::Coppe),
        );
        let resolution = resolve_classic(&t, TRUMP).unwrap();
        assert_eq!(resolution.winner, Side::Human);
        assert_eq!(resolution.base_points, 21);
        assert_eq!(resolution.total_points, 21);
        assert!(resolution.bonuses.is_empty());
        assert_eq!(resolution.award(Side::Ai), 0);
    }

    #[test]
    fn incomplete_trick_is_rejected() {
        let mut t = Trick::new(Side::Human);
        t.play(Side::Human, Card::new(Rank::Two, Suit::Coppe))
            .unwrap();
        assert_eq!(
            resolve_classic(&t, TRUMP),
            Err(ResolveError::IncompleteTrick { found: 1 })
        );
    }

    #[test]
    fn temporary_briscola_only_counts_when_enabled() {
        let lead = Card::new(Rank::Asso, Suit::Coppe);
        let follow = Card::new(Rank::Two, Suit::Spade).as_temporary_briscola();
        let t = trick(Side::Human, lead, follow);
        assert_eq!(resolve_classic(&t, TRUMP).unwrap().winner, Side::Human);
        let modifiers = ModifierSet::CLASSIC.with_temporary_briscola(true);
        let resolution = resolve(&t, &modifiers, TrickContext::default());
        assert_eq!(resolution.winner, Side::Ai);
        assert_eq!(resolution.total_points, 11);
    }

    #[test]
    fn value_inversion_uses_alternate_table() {
        let t = trick(
            Side::Human,
            Card::new(Rank::Four, Suit::Coppe),
            Card::new(Rank::Asso, Suit::Coppe),
        );
        let modifiers = ModifierSet::CLASSIC.with_value_inversion(true);
        let resolution = resolve(&t, &modifiers, TrickContext::default());
        assert_eq!(resolution.winner, Side::Ai);
        assert_eq!(resolution.base_points, 10);
        assert_eq!(resolution.total_points, 10);
    }

    #[test]
    fn elements_ignored_when_mode_disabled() {
        let t = trick(
            Side::Human,
            elemental(Rank::Asso, Suit::Coppe, Element::Fire),
            elemental(Rank::Two, Suit::Coppe, Element::Air),
        );
        let resolution = resolve(&t, &ModifierSet::CLASSIC, TrickContext::default());
        assert_eq!(resolution.clash, None);
        assert_eq!(resolution.total_points, 11);
    }

    #[test]
    fn clash_winner_does_not_decide_trick() {
        // Water beats fire in the clash, but the fire card is trump.
        let lead = elemental(Rank::Asso, Suit::Coppe, Element::Water);
        let follow = elemental(Rank::Two, TRUMP, Element::Fire);
        let resolution = resolve(
            &trick(Side::Human, lead, follow),
            &elemental_modifiers(),
            TrickContext::default(),
        );
        assert_eq!(resolution.clash.unwrap().winner(), Some(Side::Human));
        assert_eq!(resolution.winner, Side::Ai);
        // Water halves the fire card (0 points): no change. Fire lost the clash.
        assert_eq!(resolution.total_points, 11);
    }

    #[test]
    fn fire_adds_flat_bonus_to_winning_side() {
        let lead = elemental(Rank::Re, Suit::Coppe, Element::Fire);
        let follow = elemental(Rank::Two, Suit::Denari, Element::Air);
        let resolution = resolve(
            &trick(Side::Human, lead, follow),
            &elemental_modifiers(),
            TrickContext::default(),
        );
        assert_eq!(resolution.winner, Side::Human);
        assert_eq!(resolution.total_points, 4 + FIRE_BONUS);
        assert_eq!(
            resolution.bonuses,
            vec![BonusEntry {
                side: Side::Human,
                reason: BonusReason::FireBonus,
                delta: 3
            }]
        );
    }

    #[test]
    fn water_halves_other_card_rounding_reduction_up() {
        // Only the human's card is elemental and active.
        let lead = Card::new(Rank::Cavallo, Suit::Coppe);
        let follow = elemental(Rank::Two, Suit::Coppe, Element::Water);
        let resolution = resolve(
            &trick(Side::Ai, lead, follow),
            &elemental_modifiers(),
            TrickContext::default(),
        );
        assert_eq!(resolution.clash, None);
        assert_eq!(resolution.winner, Side::Ai);
        assert_eq!(resolution.base_points, 3);
        assert_eq!(resolution.total_points, 1);
        assert_eq!(resolution.bonuses[0].reason, BonusReason::WaterHalving);
        assert_eq!(resolution.bonuses[0].delta, -2);
    }

    #[test]
    fn water_applies_after_losing_the_clash() {
        // Earth beats water in the clash and the Re takes the trick.
        let lead = elemental(Rank::Two, Suit::Coppe, Element::Water);
        let follow = elemental(Rank::Re, Suit::Coppe, Element::Earth);
        let resolution = resolve(
            &trick(Side::Human, lead, follow),
            &elemental_modifiers(),
            TrickContext::default(),
        );
        assert_eq!(resolution.clash.unwrap().winner(), Some(Side::Ai));
        assert_eq!(resolution.winner, Side::Ai);
        assert_eq!(resolution.total_points, 2);
        assert_eq!(
            resolution.bonuses,
            vec![BonusEntry {
                side: Side::Ai,
                reason: BonusReason::WaterHalving,
                delta: -2
            }]
        );
        assert_eq!(resolution.award(Side::Human), 0);
    }

    #[test]
    fn water_is_spent_when_it_wins_the_clash() {
        // Water beats fire, so neither element touches the points.
        let lead = elemental(Rank::Two, Suit::Coppe, Element::Water);
        let follow = elemental(Rank::Re, Suit::Coppe, Element::Fire);
        let resolution = resolve(
            &trick(Side::Human, lead, follow),
            &elemental_modifiers(),
            TrickContext::default(),
        );
        assert_eq!(resolution.clash.unwrap().winner(), Some(Side::Human));
        assert_eq!(resolution.winner, Side::Ai);
        assert_eq!(resolution.total_points, 4);
        assert!(resolution.bonuses.is_empty());
    }

    #[test]
    fn water_never_cuts_its_own_winnings() {
        let lead = elemental(Rank::Asso, Suit::Coppe, Element::Water);
        let follow = Card::new(Rank::Re, Suit::Coppe);
        let resolution = resolve(
            &trick(Side::Human, lead, follow),
            &elemental_modifiers(),
            TrickContext::default(),
        );
        assert_eq!(resolution.clash, None);
        assert_eq!(resolution.winner, Side::Human);
        assert_eq!(resolution.total_points, 15);
        assert!(resolution.bonuses.is_empty());
    }

    #[test]
    fn air_stacks_with_collected_air_cards() {
        let lead = elemental(Rank::Fante, TRUMP, Element::Air);
        let follow = Card::new(Rank::Seven, Suit::Coppe);
        let context = TrickContext {
            air_collected: [4, 1],
        };
        let resolution = resolve(&trick(Side::Human, lead, follow), &elemental_modifiers(), context);
        assert_eq!(resolution.winner, Side::Human);
        assert_eq!(resolution.total_points, 2 + 4);
    }

    #[test]
    fn earth_returns_own_points_to_losing_side() {
        let lead = elemental(Rank::Three, Suit::Coppe, Element::Earth);
        let follow = Card::new(Rank::Asso, Suit::Coppe);
        let resolution = resolve(
            &trick(Side::Human, lead, follow),
            &elemental_modifiers(),
            TrickContext::default(),
        );
        assert_eq!(resolution.winner, Side::Ai);
        assert_eq!(resolution.total_points, 21);
        assert_eq!(resolution.award(Side::Human), 10);
        assert_eq!(resolution.award(Side::Ai), 21);
    }

    #[test]
    fn earth_respects_burned_card() {
        let lead = elemental(Rank::Three, Suit::Coppe, Element::Earth).burned();
        let follow = Card::new(Rank::Asso, Suit::Coppe);
        let resolution = resolve(
            &trick(Side::Human, lead, follow),
            &elemental_modifiers(),
            TrickContext::default(),
        );
        assert_eq!(resolution.total_points, 11);
        assert_eq!(resolution.award(Side::Human), 0);
    }

    #[test]
    fn inactive_element_has_no_effect() {
        let lead = Card::new(Rank::Re, Suit::Coppe).with_element(Some(Element::Fire));
        let follow = Card::new(Rank::Two, Suit::Coppe);
        let t = trick(Side::Human, lead, follow);
        assert_eq!(
            resolve(&t, &elemental_modifiers(), TrickContext::default()).total_points,
            4
        );
        let forced = elemental_modifiers().with_forced_elements(true);
        assert_eq!(
            resolve(&t, &forced, TrickContext::default()).total_points,
            4 + FIRE_BONUS
        );
    }

    #[test]
    fn clash_tie_cancels_all_element_effects() {
        let lead = elemental(Rank::Re, Suit::Coppe, Element::Fire);
        let follow = elemental(Rank::Cavallo, Suit::Coppe, Element::Earth);
        let t = trick(Side::Human, lead, follow);
        let modifiers = elemental_modifiers();
        // Search for a seed that produces a tied roll.
        let tied = (0..10_000u64).find_map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let resolution =
                resolve_trick(&t, TRUMP, &modifiers, &TrickContext::default(), &mut rng).unwrap();
            resolution
                .clash
                .filter(ClashOutcome::is_tie)
                .map(|_| resolution)
        });
        let resolution = tied.expect("a tie within ten thousand seeds");
        assert_eq!(resolution.winner, Side::Human);
        assert_eq!(resolution.total_points, 7);
        assert!(resolution.bonuses.is_empty());
    }

    #[test]
    fn override_decides_neutral_clash() {
        let lead = elemental(Rank::Re, Suit::Coppe, Element::Fire);
        let follow = elemental(Rank::Cavallo, Suit::Coppe, Element::Earth);
        let modifiers = elemental_modifiers().with_guaranteed_clash_winner(Some(Side::Ai));
        let resolution = resolve(&trick(Side::Human, lead, follow), &modifiers, TrickContext::default());
        assert_eq!(resolution.clash, Some(ClashOutcome::Override { winner: Side::Ai }));
        // Human wins the trick; AI's earth returns its Cavallo.
        assert_eq!(resolution.winner, Side::Human);
        assert_eq!(resolution.total_points, 7);
        assert_eq!(resolution.award(Side::Ai), 3);
    }

    #[test]
    fn powers_apply_only_when_human_wins() {
        let powers = PowerLevels {
            flat: 2,
            face_cards: 1,
            briscola: 3,
        };
        let modifiers = ModifierSet::CLASSIC.with_powers(powers);
        let won = trick(
            Side::Human,
            Card::new(Rank::Re, TRUMP),
            Card::new(Rank::Fante, Suit::Coppe),
        );
        let resolution = resolve(&won, &modifiers, TrickContext::default());
        assert_eq!(resolution.winner, Side::Human);
        assert_eq!(resolution.base_points, 6);
        assert_eq!(resolution.total_points, 6 + 2 + 2 + 3);

        let lost = trick(
            Side::Ai,
            Card::new(Rank::Re, TRUMP),
            Card::new(Rank::Fante, Suit::Coppe),
        );
        let resolution = resolve(&lost, &modifiers, TrickContext::default());
        assert_eq!(resolution.winner, Side::Ai);
        assert_eq!(resolution.total_points, 6);
    }

    #[test]
    fn briscola_power_ignores_flags_when_temporary_trump_is_off() {
        let powers = PowerLevels {
            briscola: 3,
            ..PowerLevels::NONE
        };
        let t = trick(
            Side::Human,
            Card::new(Rank::Re, Suit::Coppe).as_temporary_briscola(),
            Card::new(Rank::Fante, Suit::Coppe),
        );

        let plain = ModifierSet::CLASSIC.with_powers(powers);
        let resolution = resolve(&t, &plain, TrickContext::default());
        assert_eq!(resolution.winner, Side::Human);
        assert_eq!(resolution.total_points, 6);
        assert!(resolution.bonuses.is_empty());

        let honoured = plain.with_temporary_briscola(true);
        let resolution = resolve(&t, &honoured, TrickContext::default());
        assert_eq!(resolution.total_points, 6 + 3);
    }

    #[test]
    fn bonuses_never_make_total_negative() {
        let lead = Card::new(Rank::Asso, Suit::Coppe).burned();
        let follow = elemental(Rank::Two, Suit::Coppe, Element::Water);
        let resolution = resolve(
            &trick(Side::Ai, lead, follow),
            &elemental_modifiers(),
            TrickContext::default(),
        );
        assert_eq!(resolution.base_points, 0);
        assert_eq!(resolution.total_points, 0);
        assert!(resolution.bonuses.is_empty());
    }
}
