use crate::game::mode::GameMode;
use crate::model::card::CardId;
use crate::model::deck::Deck;
use crate::model::modifiers::ModifierSet;
use crate::model::player::Side;
use crate::model::round::{
    DealError, DealOptions, PlayError, PlayOutcome, RoundPhase, RoundState,
    TrickReport,
};
use crate::model::score::RoundResult;
use crate::rules::TrickResolution;
use rand::SeedableRng;
use rand::rngs::StdRng;

const TRICK_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// A card choice handed back by whoever drives a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChosenPlay {
    pub card: CardId,
    pub activate_element: bool,
}

impl ChosenPlay {
    pub const fn plain(card: CardId) -> Self {
        Self {
            card,
            activate_element: false,
        }
    }
}

/// One seeded game: the deal comes from `seed`, and every trick draws its
/// clash dice from a stream derived from `seed` and the trick number, so a
/// restored snapshot resolves exactly like the original.
#[derive(Debug, Clone)]
pub struct MatchState {
    seed: u64,
    mode: GameMode,
    round: RoundState,
}

impl MatchState {
    pub fn new(mode: GameMode) -> Result<Self, DealError> {
        let seed: u64 = rand::random();
        Self::with_seed(mode, seed)
    }

    pub fn with_seed(mode: GameMode, seed: u64) -> Result<Self, DealError> {
        Self::with_options(mode, seed, mode.default_modifiers(), true)
    }

    pub fn with_options(
        mode: GameMode,
        seed: u64,
        modifiers: ModifierSet,
        reveal_trump: bool,
    ) -> Result<Self, DealError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = Deck::shuffled(&mut rng);
        if mode.uses_elements() {
            deck.assign_elements(&mut rng);
        }
        let options = DealOptions {
            first_leader: mode.first_leader(&mut rng),
            reveal_trump,
        };
        let round = RoundState::deal(deck, options, modifiers)?;
        Ok(Self { seed, mode, round })
    }

    pub(crate) fn from_parts(seed: u64, mode: GameMode, round: RoundState) -> Self {
        Self { seed, mode, round }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.round
    }

    pub fn is_over(&self) -> bool {
        self.round.is_over()
    }

    pub fn result(&self) -> Option<RoundResult> {
        self.round.result()
    }

    pub fn play(&mut self, side: Side, choice: ChosenPlay) -> Result<PlayOutcome, PlayError> {
        self.round
            .play_card(side, choice.card, choice.activate_element)
    }

    /// Asks `choose` for the side whose turn it is and plays its answer.
    pub fn play_turn_with<F>(&mut self, choose: F) -> Result<PlayOutcome, PlayError>
    where
        F: FnOnce(&RoundState, Side) -> ChosenPlay,
    {
        let side = self.round.turn();
        let choice = choose(&self.round, side);
        self.play(side, choice)
    }

    pub fn pending_resolution(&mut self) -> Result<&TrickResolution, PlayError> {
        let mut rng = self.trick_rng();
        self.round.pending_resolution(&mut rng)
    }

    pub fn complete_trick(&mut self) -> Result<TrickReport, PlayError> {
        let mut rng = self.trick_rng();
        self.round.finish_trick(&mut rng)
    }

    /// Plays the round to the end, resolving each trick as soon as both
    /// cards are down.
    pub fn play_out<F>(&mut self, mut choose: F) -> Result<RoundResult, PlayError>
    where
        F: FnMut(&RoundState, Side) -> ChosenPlay,
    {
        loop {
            if let Some(result) = self.round.result() {
                return Ok(result);
            }
            if self.round.phase() == RoundPhase::Resolving {
                self.complete_trick()?;
                continue;
            }
            if let PlayOutcome::TrickReady = self.play_turn_with(&mut choose)? {
                self.complete_trick()?;
            }
        }
    }

    fn trick_rng(&self) -> StdRng {
        let trick = u64::from(self.round.trick_counter()) + 1;
        StdRng::seed_from_u64(self.seed ^ trick.wrapping_mul(TRICK_STREAM))
    }
}
