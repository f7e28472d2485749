use crate::model::card::{Card, CardId};
use serde::{Deserialize, Serialize};

/// Cards held by one side, looked up by [`CardId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes and returns the card with `id`, leaving no copy behind.
    pub fn take(&mut self, id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        Some(self.cards.remove(index))
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    /// Swaps the card with `id` for `update(card)`. Returns the new value.
    pub fn replace_with<F>(&mut self, id: CardId, update: F) -> Option<Card>
    where
        F: FnOnce(Card) -> Card,
    {
        let slot = self.cards.iter_mut().find(|card| card.id == id)?;
        let next = update(*slot);
        *slot = next;
        Some(next)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
