use core::fmt;
use serde::{Deserialize, Serialize};

/// Elemental affinity carried by cards in roguelike and dungeon modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Water,
    Fire,
    Air,
    Earth,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Water, Element::Fire, Element::Air, Element::Earth];

    /// The single element this one beats in the weakness cycle
    /// water > fire > air > earth > water.
    pub const fn beats(self) -> Element {
        match self {
            Element::Water => Element::Fire,
            Element::Fire => Element::Air,
            Element::Air => Element::Earth,
            Element::Earth => Element::Water,
        }
    }

    pub const fn weak_to(self) -> Element {
        match self {
            Element::Water => Element::Earth,
            Element::Fire => Element::Water,
            Element::Air => Element::Fire,
            Element::Earth => Element::Air,
        }
    }

    pub fn advantage_over(self, other: Element) -> Advantage {
        if self.beats() == other {
            Advantage::Strong
        } else if other.beats() == self {
            Advantage::Weak
        } else {
            Advantage::Neutral
        }
    }
}

/// Relationship of one element to another in the weakness cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advantage {
    Strong,
    Weak,
    Neutral,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Element::Water => "water",
            Element::Fire => "fire",
            Element::Air => "air",
            Element::Earth => "earth",
        };
        f.write_str(label)
    }
}
