pub mod bot;
pub mod policy;

pub use bot::{BotContext, BotDifficulty, DIFFICULTY_ENV, PlayPlanner, select_ai_card};
pub use policy::{HeuristicPolicy, Policy, PolicyContext};
