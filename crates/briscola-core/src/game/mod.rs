pub mod match_state;
pub mod mode;
pub mod serialization;

pub use match_state::{ChosenPlay, MatchState};
pub use mode::{GameMode, UnknownMode};
pub use serialization::{MatchSnapshot, RoundSnapshot, SnapshotError};
