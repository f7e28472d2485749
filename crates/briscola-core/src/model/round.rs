use crate::model::card::{Card, CardId};
use crate::model::deck::Deck;
use crate::model::element::Element;
use crate::model::hand::Hand;
use crate::model::modifiers::ModifierSet;
use crate::model::player::Side;
use crate::model::score::{RoundResult, ScoreBoard};
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError, TrickKey};
use crate::rules::{ResolveError, TrickContext, TrickResolution, resolve_trick};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet, VecDeque};
use thiserror::Error;
use tracing::{Level, event};

pub const HAND_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealOptions {
    pub first_leader: Side,
    /// Turn the trump card face up beside the stock. When false the trump
    /// suit is read from the bottom stock card, which stays in the stock.
    pub reveal_trump: bool,
}

impl Default for DealOptions {
    fn default() -> Self {
        Self {
            first_leader: Side::Human,
            reveal_trump: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    AwaitingPlay,
    /// Two cards on the table; the trick must be finished before play resumes.
    Resolving,
    RoundOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("dealing needs at least {needed} cards but the deck has {found}")]
    NotEnoughCards { needed: usize, found: usize },
    #[error("card {0} appears more than once")]
    DuplicateCard(CardId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("the round is over")]
    RoundOver,
    #[error("the trick on the table must be resolved first")]
    TrickAwaitingResolution,
    #[error("no complete trick on the table")]
    NothingToResolve,
    #[error("expected {expected} to play but got {actual}")]
    OutOfTurn { expected: Side, actual: Side },
    #[error("card {card} is not in the {side} hand")]
    CardNotInHand { side: Side, card: CardId },
    #[error(transparent)]
    Trick(#[from] TrickError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// First card of the trick is down; the turn passed to the opponent.
    Played { next: Side },
    /// Second card is down; call [`RoundState::finish_trick`].
    TrickReady,
}

/// Everything that happened when a trick was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickSummary {
    pub resolution: TrickResolution,
    /// Cards drawn afterwards, winner first.
    pub draws: Vec<(Side, Card)>,
    pub result: Option<RoundResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickReport {
    Applied(Box<TrickSummary>),
    /// The same pair of cards was already scored; the table was cleared
    /// without touching the scores.
    Duplicate(TrickKey),
    /// Nothing was waiting on the table.
    Idle,
}

/// One two-player Briscola round, exclusively owned by its driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub(crate) stock: VecDeque<Card>,
    pub(crate) hands: [Hand; 2],
    pub(crate) briscola_card: Option<Card>,
    pub(crate) briscola_suit: Suit,
    pub(crate) table: Trick,
    pub(crate) turn: Side,
    pub(crate) trick_starter: Side,
    pub(crate) scores: ScoreBoard,
    pub(crate) piles: [Vec<Card>; 2],
    pub(crate) trick_counter: u32,
    pub(crate) history: Vec<TrickResolution>,
    pub(crate) resolved: BTreeSet<TrickKey>,
    pub(crate) modifiers: ModifierSet,
    pub(crate) pending: Option<TrickResolution>,
    pub(crate) phase: RoundPhase,
}

impl RoundState {
    /// Deals three cards to each side (alternating, leader first), reveals
    /// the trump and keeps the remainder as the stock.
    pub fn deal(deck: Deck, options: DealOptions, modifiers: ModifierSet) -> Result<Self, DealError> {
        let needed = HAND_SIZE * 2 + 1;
        if deck.len() < needed {
            return Err(DealError::NotEnoughCards {
                needed,
                found: deck.len(),
            });
        }
        let mut cards: VecDeque<Card> = deck.into_cards().into();
        let mut hands = [Vec::new(), Vec::new()];
        let mut receiver = options.first_leader;
        for _ in 0..HAND_SIZE * 2 {
            if let Some(card) = cards.pop_front() {
                hands[receiver.index()].push(card);
            }
            receiver = receiver.opponent();
        }

        let trump = if options.reveal_trump {
            cards.pop_front()
        } else {
            cards.back().copied()
        };
        let Some(trump) = trump else {
            return Err(DealError::NotEnoughCards { needed, found: 0 });
        };
        let briscola_card = options.reveal_trump.then_some(trump);

        let round = Self::from_layout(
            hands,
            cards.into(),
            briscola_card,
            trump.suit,
            options.first_leader,
            modifiers,
        )?;
        event!(
            target: "briscola_core::round",
            Level::DEBUG,
            briscola = %trump.suit,
            leader = %options.first_leader,
            stock = round.stock.len(),
            "round dealt"
        );
        Ok(round)
    }

    /// Builds a round from an explicit layout. Every card id must be unique
    /// across hands, stock and trump slot.
    pub fn from_layout(
        hands: [Vec<Card>; 2],
        stock: Vec<Card>,
        briscola_card: Option<Card>,
        briscola_suit: Suit,
        leader: Side,
        modifiers: ModifierSet,
    ) -> Result<Self, DealError> {
        let mut seen = HashSet::new();
        for card in hands
            .iter()
            .flatten()
            .chain(stock.iter())
            .chain(briscola_card.iter())
        {
            if !seen.insert(card.id) {
                return Err(DealError::DuplicateCard(card.id));
            }
        }

        let [human, ai] = hands;
        let mut round = Self {
            stock: stock.into(),
            hands: [Hand::with_cards(human), Hand::with_cards(ai)],
            briscola_card,
            briscola_suit,
            table: Trick::new(leader),
            turn: leader,
            trick_starter: leader,
            scores: ScoreBoard::new(),
            piles: [Vec::new(), Vec::new()],
            trick_counter: 0,
            history: Vec::new(),
            resolved: BTreeSet::new(),
            modifiers,
            pending: None,
            phase: RoundPhase::AwaitingPlay,
        };
        if round.is_exhausted() {
            round.phase = RoundPhase::RoundOver;
        }
        Ok(round)
    }

    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side.index()]
    }

    pub fn stock(&self) -> impl Iterator<Item = &Card> {
        self.stock.iter()
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn briscola_card(&self) -> Option<Card> {
        self.briscola_card
    }

    pub fn briscola_suit(&self) -> Suit {
        self.briscola_suit
    }

    /// Cards still to be drawn, trump card included.
    pub fn cards_left_to_draw(&self) -> usize {
        self.stock.len() + usize::from(self.briscola_card.is_some())
    }

    pub fn table(&self) -> &Trick {
        &self.table
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn trick_starter(&self) -> Side {
        self.trick_starter
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn pile(&self, side: Side) -> &[Card] {
        &self.piles[side.index()]
    }

    pub fn trick_counter(&self) -> u32 {
        self.trick_counter
    }

    pub fn history(&self) -> &[TrickResolution] {
        &self.history
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, RoundPhase::RoundOver)
    }

    pub fn result(&self) -> Option<RoundResult> {
        self.is_over()
            .then(|| RoundResult::from_scores(&self.scores))
    }

    /// Replaces the optional rules for upcoming resolutions. A cached but
    /// unapplied resolution is dropped so the new rules take effect.
    pub fn set_modifiers(&mut self, modifiers: ModifierSet) {
        self.modifiers = modifiers;
        self.pending = None;
    }

    /// Cards `side` may play right now. Briscola has no follow-suit
    /// obligation, so this is the whole hand on that side's turn.
    pub fn legal_cards(&self, side: Side) -> Vec<Card> {
        if self.phase != RoundPhase::AwaitingPlay || self.turn != side {
            return Vec::new();
        }
        self.hand(side).cards().to_vec()
    }

    pub fn play_card(
        &mut self,
        side: Side,
        card: CardId,
        activate_element: bool,
    ) -> Result<PlayOutcome, PlayError> {
        match self.phase {
            RoundPhase::RoundOver => return Err(PlayError::RoundOver),
            RoundPhase::Resolving => return Err(PlayError::TrickAwaitingResolution),
            RoundPhase::AwaitingPlay => {}
        }
        if self.turn != side {
            return Err(PlayError::OutOfTurn {
                expected: self.turn,
                actual: side,
            });
        }
        let held = *self
            .hand(side)
            .get(card)
            .ok_or(PlayError::CardNotInHand { side, card })?;
        let staged = held.with_activation(activate_element && held.element.is_some());

        self.table.play(side, staged)?;
        let _ = self.hands[side.index()].take(card);

        event!(
            target: "briscola_core::round",
            Level::TRACE,
            side = %side,
            card = %staged,
            activated = staged.status.element_activated,
        );

        if self.table.is_complete() {
            self.phase = RoundPhase::Resolving;
            Ok(PlayOutcome::TrickReady)
        } else {
            self.turn = side.opponent();
            Ok(PlayOutcome::Played { next: self.turn })
        }
    }

    /// Computes (once) the resolution of the trick on the table without
    /// applying it, so a caller can present the clash first.
    pub fn pending_resolution<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&TrickResolution, PlayError> {
        if self.phase != RoundPhase::Resolving {
            return Err(PlayError::NothingToResolve);
        }
        if self.pending.is_none() {
            let context = self.trick_context();
            let resolution = resolve_trick(
                &self.table,
                self.briscola_suit,
                &self.modifiers,
                &context,
                rng,
            )?;
            self.pending = Some(resolution);
        }
        self.pending.as_ref().ok_or(PlayError::NothingToResolve)
    }

    /// Applies the trick on the table: scores, piles, draws (winner first),
    /// turn hand-off and round-end detection. Calling it again without a
    /// new trick is a no-op.
    pub fn finish_trick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TrickReport, PlayError> {
        if self.phase != RoundPhase::Resolving {
            return Ok(TrickReport::Idle);
        }
        let key = self.table.key().ok_or(PlayError::NothingToResolve)?;

        if self.resolved.contains(&key) {
            event!(
                target: "briscola_core::round",
                Level::WARN,
                trick = ?key,
                "skipping already scored trick"
            );
            self.pending = None;
            self.file_replayed_cards(key);
            self.table = Trick::new(self.trick_starter);
            self.turn = self.trick_starter;
            self.phase = self.next_phase();
            return Ok(TrickReport::Duplicate(key));
        }

        self.pending_resolution(rng)?;
        let resolution = self.pending.take().ok_or(PlayError::NothingToResolve)?;
        let winner = resolution.winner;

        for side in Side::BOTH {
            self.scores.add(side, resolution.award(side));
        }
        self.piles[winner.index()].extend([resolution.lead.settled(), resolution.follow.settled()]);
        self.trick_counter += 1;
        self.resolved.insert(key);
        self.history.push(resolution.clone());

        self.table = Trick::new(winner);
        self.trick_starter = winner;
        self.turn = winner;
        let draws = self.draw_after(winner);
        self.phase = self.next_phase();

        let result = self.result();
        if let Some(result) = result {
            event!(
                target: "briscola_core::round",
                Level::INFO,
                winner = ?result.winner,
                human = result.human_score,
                ai = result.ai_score,
                tricks = self.trick_counter,
                "round over"
            );
        }

        Ok(TrickReport::Applied(Box::new(TrickSummary {
            resolution,
            draws,
            result,
        })))
    }

    /// Burns a card in `side`'s hand: it will score 0 points.
    pub fn burn_card(&mut self, side: Side, card: CardId) -> Result<Card, PlayError> {
        self.update_card(side, card, Card::burned)
    }

    pub fn fortify_card(&mut self, side: Side, card: CardId) -> Result<Card, PlayError> {
        self.update_card(side, card, Card::fortified)
    }

    pub fn mark_temporary_briscola(&mut self, side: Side, card: CardId) -> Result<Card, PlayError> {
        self.update_card(side, card, Card::as_temporary_briscola)
    }

    /// Curses are a presentation constraint only; scoring ignores them.
    pub fn set_cursed(&mut self, side: Side, card: CardId, cursed: bool) -> Result<Card, PlayError> {
        self.update_card(side, card, |held| held.with_curse(cursed))
    }

    fn update_card<F>(&mut self, side: Side, card: CardId, update: F) -> Result<Card, PlayError>
    where
        F: FnOnce(Card) -> Card,
    {
        self.hands[side.index()]
            .replace_with(card, update)
            .ok_or(PlayError::CardNotInHand { side, card })
    }

    /// Moves a replayed pair off the table without scoring it. Cards already
    /// sitting in a pile are stale copies and are dropped; any other card
    /// joins the pile of whoever took that trick the first time.
    fn file_replayed_cards(&mut self, key: TrickKey) {
        let owner = self
            .history
            .iter()
            .find(|resolution| resolution.key() == key)
            .map_or(self.trick_starter, |resolution| resolution.winner);
        for card in self.table.cards() {
            let filed = self.piles.iter().flatten().any(|held| held.id == card.id);
            if !filed {
                self.piles[owner.index()].push(card.settled());
            }
        }
    }

    fn trick_context(&self) -> TrickContext {
        let count_air = |pile: &Vec<Card>| {
            pile.iter()
                .filter(|card| card.element == Some(Element::Air))
                .count() as u32
        };
        TrickContext {
            air_collected: [count_air(&self.piles[0]), count_air(&self.piles[1])],
        }
    }

    fn draw_after(&mut self, winner: Side) -> Vec<(Side, Card)> {
        let mut draws = Vec::with_capacity(2);
        for side in [winner, winner.opponent()] {
            let next = self.stock.pop_front().or_else(|| self.briscola_card.take());
            if let Some(card) = next {
                event!(
                    target: "briscola_core::round",
                    Level::TRACE,
                    side = %side,
                    card = %card,
                    "draw"
                );
                self.hands[side.index()].add(card);
                draws.push((side, card));
            }
        }
        draws
    }

    fn is_exhausted(&self) -> bool {
        self.table.is_empty()
            && self.stock.is_empty()
            && self.briscola_card.is_none()
            && self.hands.iter().all(Hand::is_empty)
    }

    fn next_phase(&self) -> RoundPhase {
        if self.is_exhausted() {
            RoundPhase::RoundOver
        } else {
            RoundPhase::AwaitingPlay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rank::Rank;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(31)
    }

    fn applied(report: TrickReport) -> TrickSummary {
        match report {
            TrickReport::Applied(summary) => *summary,
            other => panic!("expected applied trick, got {other:?}"),
        }
    }

    #[test]
    fn deal_gives_three_cards_each_and_reveals_trump() {
        let round = RoundState::deal(
            Deck::standard(),
            DealOptions::default(),
            ModifierSet::CLASSIC,
        )
        .unwrap();
        assert_eq!(round.hand(Side::Human).len(), 3);
        assert_eq!(round.hand(Side::Ai).len(), 3);
        assert_eq!(round.stock_len(), 33);
        let trump = round.briscola_card().unwrap();
        assert_eq!(round.briscola_suit(), trump.suit);
        assert_eq!(round.turn(), Side::Human);
        assert_eq!(round.cards_left_to_draw(), 34);
    }

    #[test]
    fn hidden_trump_reads_bottom_card() {
        let options = DealOptions {
            first_leader: Side::Ai,
            reveal_trump: false,
        };
        let round = RoundState::deal(Deck::standard(), options, ModifierSet::CLASSIC).unwrap();
        assert_eq!(round.briscola_card(), None);
        assert_eq!(round.stock_len(), 34);
        assert_eq!(round.briscola_suit(), Suit::Bastoni);
        assert_eq!(round.turn(), Side::Ai);
    }

    #[test]
    fn deal_rejects_short_deck() {
        let deck = Deck::from_cards(vec![card(Rank::Two, Suit::Coppe)]);
        assert_eq!(
            RoundState::deal(deck, DealOptions::default(), ModifierSet::CLASSIC),
            Err(DealError::NotEnoughCards {
                needed: 7,
                found: 1
            })
        );
    }

    #[test]
    fn layout_rejects_duplicate_ids() {
        let dup = card(Rank::Asso, Suit::Coppe);
        let result = RoundState::from_layout(
            [vec![dup], vec![dup.burned()]],
            Vec::new(),
            None,
            Suit::Coppe,
            Side::Human,
            ModifierSet::CLASSIC,
        );
        assert_eq!(result, Err(DealError::DuplicateCard(dup.id)));
    }

    #[test]
    fn turn_flips_only_after_first_card() {
        let mut round = RoundState::from_layout(
            [
                vec![card(Rank::Asso, Suit::Coppe)],
                vec![card(Rank::Two, Suit::Coppe)],
            ],
            Vec::new(),
            None,
            Suit::Spade,
            Side::Human,
            ModifierSet::CLASSIC,
        )
        .unwrap();
        let outcome = round
            .play_card(Side::Human, card(Rank::Asso, Suit::Coppe).id, false)
            .unwrap();
        assert_eq!(outcome, PlayOutcome::Played { next: Side::Ai });
        let outcome = round
            .play_card(Side::Ai, card(Rank::Two, Suit::Coppe).id, false)
            .unwrap();
        assert_eq!(outcome, PlayOutcome::TrickReady);
        assert_eq!(round.turn(), Side::Ai);
        assert_eq!(round.phase(), RoundPhase::Resolving);
    }

    #[test]
    fn invalid_plays_leave_state_untouched() {
        let mut round = RoundState::deal(
            Deck::standard(),
            DealOptions::default(),
            ModifierSet::CLASSIC,
        )
        .unwrap();
        let before = round.clone();
        let ai_card = round.hand(Side::Ai).cards()[0].id;
        assert_eq!(
            round.play_card(Side::Ai, ai_card, false),
            Err(PlayError::OutOfTurn {
                expected: Side::Human,
                actual: Side::Ai
            })
        );
        assert_eq!(
            round.play_card(Side::Human, ai_card, false),
            Err(PlayError::CardNotInHand {
                side: Side::Human,
                card: ai_card
            })
        );
        assert_eq!(round, before);
    }

    #[test]
    fn winner_draws_stock_and_loser_draws_trump() {
        let last_stock = card(Rank::Seven, Suit::Denari);
        let trump = card(Rank::Re, Suit::Bastoni);
        let mut round = RoundState::from_layout(
            [
                vec![card(Rank::Asso, Suit::Coppe), card(Rank::Five, Suit::Spade)],
                vec![card(Rank::Two, Suit::Coppe), card(Rank::Six, Suit::Spade)],
            ],
            vec![last_stock],
            Some(trump),
            Suit::Bastoni,
            Side::Human,
            ModifierSet::CLASSIC,
        )
        .unwrap();
        round
            .play_card(Side::Human, card(Rank::Asso, Suit::Coppe).id, false)
            .unwrap();
        round
            .play_card(Side::Ai, card(Rank::Two, Suit::Coppe).id, false)
            .unwrap();
        let summary = applied(round.finish_trick(&mut rng()).unwrap());
        assert_eq!(summary.resolution.winner, Side::Human);
        assert_eq!(
            summary.draws,
            vec![(Side::Human, last_stock), (Side::Ai, trump)]
        );
        assert_eq!(round.stock_len(), 0);
        assert_eq!(round.briscola_card(), None);
        assert_eq!(round.scores().score(Side::Human), 11);
        assert_eq!(round.turn(), Side::Human);
        assert_eq!(round.trick_starter(), Side::Human);
        assert!(round.hand(Side::Ai).contains(trump.id));
    }

    #[test]
    fn finishing_twice_is_a_no_op() {
        let mut round = RoundState::from_layout(
            [
                vec![card(Rank::Three, Suit::Coppe), card(Rank::Four, Suit::Denari)],
                vec![card(Rank::Re, Suit::Coppe), card(Rank::Five, Suit::Denari)],
            ],
            Vec::new(),
            None,
            Suit::Spade,
            Side::Human,
            ModifierSet::CLASSIC,
        )
        .unwrap();
        round
            .play_card(Side::Human, card(Rank::Three, Suit::Coppe).id, false)
            .unwrap();
        round
            .play_card(Side::Ai, card(Rank::Re, Suit::Coppe).id, false)
            .unwrap();
        let mut rng = rng();
        applied(round.finish_trick(&mut rng).unwrap());
        let scores = *round.scores();
        assert_eq!(round.finish_trick(&mut rng).unwrap(), TrickReport::Idle);
        assert_eq!(*round.scores(), scores);
        assert_eq!(round.trick_counter(), 1);
    }

    #[test]
    fn replayed_card_pair_is_not_scored_twice() {
        let three = card(Rank::Three, Suit::Coppe);
        let re = card(Rank::Re, Suit::Coppe);
        let mut round = RoundState::from_layout(
            [vec![three], vec![re]],
            Vec::new(),
            None,
            Suit::Spade,
            Side::Human,
            ModifierSet::CLASSIC,
        )
        .unwrap();
        round.play_card(Side::Human, three.id, false).unwrap();
        round.play_card(Side::Ai, re.id, false).unwrap();
        let mut rng = rng();
        applied(round.finish_trick(&mut rng).unwrap());
        assert!(round.is_over());

        // Put the same pair back on the table as a restored client might.
        round.table = Trick::new(Side::Human);
        round.table.play(Side::Human, three).unwrap();
        round.table.play(Side::Ai, re).unwrap();
        round.phase = RoundPhase::Resolving;
        assert_eq!(
            round.finish_trick(&mut rng).unwrap(),
            TrickReport::Duplicate(TrickKey::new(three.id, re.id))
        );
        assert_eq!(round.scores().totals(), [14, 0]);
        assert_eq!(round.pile(Side::Human).len(), 2);
        assert!(round.is_over());
    }

    #[test]
    fn replayed_pair_keeps_every_card_in_play() {
        let three = card(Rank::Three, Suit::Coppe);
        let re = card(Rank::Re, Suit::Coppe);
        let mut round = RoundState::from_layout(
            [vec![three], vec![re]],
            Vec::new(),
            None,
            Suit::Spade,
            Side::Human,
            ModifierSet::CLASSIC,
        )
        .unwrap();
        round.play_card(Side::Human, three.id, false).unwrap();
        round.play_card(Side::Ai, re.id, false).unwrap();
        let mut rng = rng();
        applied(round.finish_trick(&mut rng).unwrap());

        // The key is remembered but the cards were lost from the pile, as
        // after a hand-edited resume. They must land back with the winner.
        round.piles[Side::Human.index()].clear();
        round.table = Trick::new(Side::Human);
        round.table.play(Side::Human, three).unwrap();
        round.table.play(Side::Ai, re).unwrap();
        round.phase = RoundPhase::Resolving;
        assert!(matches!(
            round.finish_trick(&mut rng).unwrap(),
            TrickReport::Duplicate(_)
        ));
        assert_eq!(round.scores().totals(), [14, 0]);
        let ids: Vec<CardId> = round.pile(Side::Human).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![three.id, re.id]);
        assert!(round.table().is_empty());
    }

    #[test]
    fn pending_resolution_is_cached_until_finished() {
        let lead = card(Rank::Re, Suit::Coppe).with_element(Some(Element::Fire));
        let follow = card(Rank::Cavallo, Suit::Coppe).with_element(Some(Element::Earth));
        let modifiers = ModifierSet::CLASSIC.with_elemental_clash(true);
        let mut round = RoundState::from_layout(
            [vec![lead], vec![follow]],
            Vec::new(),
            None,
            Suit::Spade,
            Side::Human,
            modifiers,
        )
        .unwrap();
        round.play_card(Side::Human, lead.id, true).unwrap();
        round.play_card(Side::Ai, follow.id, true).unwrap();
        let mut rng = rng();
        let first = round.pending_resolution(&mut rng).unwrap().clone();
        assert!(first.clash.is_some());
        let second = round.pending_resolution(&mut rng).unwrap().clone();
        assert_eq!(first, second);
        let summary = applied(round.finish_trick(&mut rng).unwrap());
        assert_eq!(summary.resolution, first);
        let expected: [u32; 2] = [first.award(Side::Human), first.award(Side::Ai)];
        assert_eq!(round.scores().totals(), expected);
    }

    #[test]
    fn cannot_play_while_trick_pending() {
        let mut round = RoundState::from_layout(
            [
                vec![card(Rank::Asso, Suit::Coppe), card(Rank::Two, Suit::Denari)],
                vec![card(Rank::Three, Suit::Coppe), card(Rank::Four, Suit::Denari)],
            ],
            Vec::new(),
            None,
            Suit::Spade,
            Side::Human,
            ModifierSet::CLASSIC,
        )
        .unwrap();
        round
            .play_card(Side::Human, card(Rank::Asso, Suit::Coppe).id, false)
            .unwrap();
        round
            .play_card(Side::Ai, card(Rank::Three, Suit::Coppe).id, false)
            .unwrap();
        assert_eq!(
            round.play_card(Side::Ai, card(Rank::Four, Suit::Denari).id, false),
            Err(PlayError::TrickAwaitingResolution)
        );
    }

    #[test]
    fn status_updates_replace_hand_values() {
        let target = card(Rank::Asso, Suit::Coppe);
        let mut round = RoundState::from_layout(
            [vec![target], vec![card(Rank::Two, Suit::Coppe)]],
            Vec::new(),
            None,
            Suit::Spade,
            Side::Human,
            ModifierSet::CLASSIC,
        )
        .unwrap();
        assert!(round.burn_card(Side::Human, target.id).unwrap().is_burned());
        assert!(round.set_cursed(Side::Human, target.id, true).unwrap().is_cursed());
        assert!(
            round
                .mark_temporary_briscola(Side::Human, target.id)
                .unwrap()
                .counts_as_trump()
        );
        assert_eq!(
            round.fortify_card(Side::Ai, target.id),
            Err(PlayError::CardNotInHand {
                side: Side::Ai,
                card: target.id
            })
        );
        let held = round.hand(Side::Human).get(target.id).unwrap();
        assert!(held.is_burned() && held.is_cursed());
    }

    #[test]
    fn activation_flag_only_sticks_to_elemental_cards() {
        let plain = card(Rank::Asso, Suit::Coppe);
        let airy = card(Rank::Two, Suit::Coppe).with_element(Some(Element::Air));
        let mut round = RoundState::from_layout(
            [vec![plain], vec![airy]],
            Vec::new(),
            None,
            Suit::Spade,
            Side::Human,
            ModifierSet::CLASSIC,
        )
        .unwrap();
        round.play_card(Side::Human, plain.id, true).unwrap();
        round.play_card(Side::Ai, airy.id, true).unwrap();
        let plays = round.table().plays();
        assert!(!plays[0].card.status.element_activated);
        assert!(plays[1].card.status.element_activated);
    }
}
