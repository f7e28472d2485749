use crate::model::player::Side;
use crate::model::points::PointTable;
use serde::{Deserialize, Serialize};

/// Acquired levels of the passive roguelike powers. Each level adds one
/// point to the matching bonus. Powers only ever benefit the human side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerLevels {
    /// Flat bonus on every trick the human wins.
    #[serde(default)]
    pub flat: u8,
    /// Bonus per Fante, Cavallo or Re in a trick the human wins.
    #[serde(default)]
    pub face_cards: u8,
    /// Bonus when the human wins with a card of the trump suit or one
    /// standing in for it.
    #[serde(default)]
    pub briscola: u8,
}

impl PowerLevels {
    pub const NONE: PowerLevels = PowerLevels {
        flat: 0,
        face_cards: 0,
        briscola: 0,
    };

    pub const fn is_empty(self) -> bool {
        self.flat == 0 && self.face_cards == 0 && self.briscola == 0
    }
}

/// Optional rules active for a trick. A value of this type is handed to the
/// resolver; nothing reads ambient settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierSet {
    /// Honour `temporary_briscola` and `fortified` card flags.
    #[serde(default)]
    pub temporary_briscola: bool,
    /// Enable elemental clash and element effects.
    #[serde(default)]
    pub elemental_clash: bool,
    /// Treat every elemental card as activated regardless of the holder's choice.
    #[serde(default)]
    pub force_elements_active: bool,
    /// Swap in [`PointTable::Inverted`].
    #[serde(default)]
    pub value_inversion: bool,
    #[serde(default)]
    pub powers: PowerLevels,
    /// External ability deciding the next clash without dice.
    #[serde(default)]
    pub guaranteed_clash_winner: Option<Side>,
}

impl ModifierSet {
    pub const CLASSIC: ModifierSet = ModifierSet {
        temporary_briscola: false,
        elemental_clash: false,
        force_elements_active: false,
        value_inversion: false,
        powers: PowerLevels::NONE,
        guaranteed_clash_winner: None,
    };

    pub const fn point_table(&self) -> PointTable {
        if self.value_inversion {
            PointTable::Inverted
        } else {
            PointTable::Standard
        }
    }

    pub const fn is_classic(&self) -> bool {
        !self.temporary_briscola
            && !self.elemental_clash
            && !self.value_inversion
            && self.powers.is_empty()
    }

    pub const fn with_temporary_briscola(mut self, enabled: bool) -> Self {
        self.temporary_briscola = enabled;
        self
    }

    pub const fn with_elemental_clash(mut self, enabled: bool) -> Self {
        self.elemental_clash = enabled;
        self
    }

    pub const fn with_forced_elements(mut self, enabled: bool) -> Self {
        self.force_elements_active = enabled;
        self
    }

    pub const fn with_value_inversion(mut self, enabled: bool) -> Self {
        self.value_inversion = enabled;
        self
    }

    pub const fn with_powers(mut self, powers: PowerLevels) -> Self {
        self.powers = powers;
        self
    }

    pub const fn with_guaranteed_clash_winner(mut self, winner: Option<Side>) -> Self {
        self.guaranteed_clash_winner = winner;
        self
    }
}
