//! Trick resolution: the classic winner rule, the elemental clash, and the
//! modifier-aware scorer that combines them.

pub mod clash;
pub mod classic;
pub mod scoring;

pub use clash::{ClashOutcome, resolve_clash};
pub use classic::{classic_points, follow_beats_lead, is_briscola, resolve_classic_trick};
pub use scoring::{
    BonusEntry, BonusReason, TrickContext, TrickResolution, resolve_classic, resolve_trick,
};

use crate::model::card::CardId;
use thiserror::Error;

/// Caller misuse detected while resolving a trick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("a trick needs exactly two cards, found {found}")]
    IncompleteTrick { found: usize },
    #[error("elemental clash requested but card {0} has no element")]
    MissingElement(CardId),
    #[error("both plays use card {0}")]
    DuplicateCard(CardId),
}
