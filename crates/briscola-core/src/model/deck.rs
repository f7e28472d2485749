use crate::model::card::Card;
use crate::model::element::Element;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_SIZE: usize = 40;

/// Uniform in-place permutation of any slice (Fisher-Yates via `rand`).
/// Empty and single-element slices are left untouched.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Owned variant of [`shuffle`].
pub fn shuffled<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    shuffle(&mut items, rng);
    items
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 40 cards, suit-major then printed rank order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::PRINTED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffle_in_place<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle(&mut self.cards, rng);
    }

    /// Gives every card an element drawn from a shuffled pool holding the
    /// same number of each element.
    pub fn assign_elements<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let per_element = self.cards.len().div_ceil(Element::ALL.len());
        let pool: Vec<Element> = Element::ALL
            .iter()
            .flat_map(|element| std::iter::repeat_n(*element, per_element))
            .collect();
        let pool = shuffled(pool, rng);
        for (card, element) in self.cards.iter_mut().zip(pool) {
            *card = card.with_element(Some(element));
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}
