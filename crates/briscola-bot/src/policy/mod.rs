mod heuristic;

pub use heuristic::HeuristicPolicy;

use briscola_core::game::match_state::ChosenPlay;
use briscola_core::model::player::Side;
use briscola_core::model::round::RoundState;
use briscola_core::model::score::RoundResult;

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub side: Side,
    pub round: &'a RoundState,
}

impl<'a> PolicyContext<'a> {
    pub fn new(side: Side, round: &'a RoundState) -> Self {
        Self { side, round }
    }
}

/// Anything that can drive one side of a round.
pub trait Policy: Send {
    /// Card to play plus the element activation choice. `None` when the
    /// side has nothing in hand.
    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> Option<ChosenPlay>;

    /// Called once the round is over.
    fn observe_result(&mut self, _result: &RoundResult) {}
}
