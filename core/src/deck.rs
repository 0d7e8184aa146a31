use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Transitions understood by [`Deck::reduce`].
#[derive(Clone, Debug, PartialEq)]
pub enum DeckAction {
    /// Replace the whole deck with a freshly dealt one.
    Reset(Deck),
    /// Turn the card with the given id face-up.
    Flip(CardId),
    /// Resolve every face-up, unpaired card: a matching pair becomes guessed, anything else goes back down.
    Compare,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.is_candidate())
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates().count()
    }

    pub fn guessed_pairs(&self) -> PairCount {
        (self.cards.iter().filter(|card| card.guessed).count() / 2)
            .try_into()
            .unwrap_or(PairCount::MAX)
    }

    /// An empty deck never counts as cleared.
    pub fn all_guessed(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.guessed)
    }

    pub fn reduce(mut self, action: DeckAction) -> Self {
        match action {
            DeckAction::Reset(deck) => return deck,
            DeckAction::Flip(id) => {
                if let Some(card) = self.cards.iter_mut().find(|card| card.id == id) {
                    card.flipped = true;
                }
            }
            DeckAction::Compare => self.compare(),
        }
        self
    }

    fn compare(&mut self) {
        let mut candidates = self.cards.iter_mut().filter(|card| card.is_candidate());
        let pair = match (candidates.next(), candidates.next(), candidates.next()) {
            (Some(first), Some(second), None) if first.face == second.face => Some((first, second)),
            _ => None,
        };

        if let Some((first, second)) = pair {
            log::trace!("pair matched: {:?}", first.face);
            first.guessed = true;
            second.guessed = true;
            return;
        }

        for card in self.cards.iter_mut().filter(|card| card.is_candidate()) {
            card.flipped = false;
        }
    }
}

impl Index<usize> for Deck {
    type Output = Card;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cards[index]
    }
}
