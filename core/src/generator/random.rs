use super::*;
use alloc::vec::Vec;

/// Deals every face twice and shuffles the result with a seeded small RNG.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, faces: &[CardFace]) -> Deck {
        use rand::prelude::*;
        use rand::rngs::SmallRng;

        let mut unique: Vec<CardFace> = Vec::with_capacity(faces.len());
        for &face in faces {
            if unique.contains(&face) {
                log::warn!("Duplicate face in pool ignored: {:?}", face);
            } else {
                unique.push(face);
            }
        }

        let max_pairs = usize::from(CardId::MAX) / 2;
        if unique.len() > max_pairs {
            log::warn!(
                "Face pool too large, requested {} pairs but only fits {}",
                unique.len(),
                max_pairs
            );
            unique.truncate(max_pairs);
        }

        let mut cards: Vec<Card> = unique
            .iter()
            .chain(unique.iter())
            .enumerate()
            .map(|(id, &face)| Card::new(id as CardId, face))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        cards.shuffle(&mut rng);

        log::debug!("dealt {} cards (seed {})", cards.len(), self.seed);
        Deck::from_cards(cards)
    }
}
