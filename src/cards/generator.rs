//! Random target cards.
//!
//! Each attribute is drawn independently and uniformly. Consecutive
//! identical targets are possible and valid.

use super::attributes::{Color, Shape, Size, NUMBER_RANGE};
use super::definition::Card;
use crate::core::GameRng;

/// Source of target cards. Also an endless `Iterator`.
///
/// ```
/// use wcst_engine::cards::CardGenerator;
/// use wcst_engine::core::GameRng;
///
/// let cards: Vec<_> = CardGenerator::new(GameRng::new(1)).take(3).collect();
/// assert_eq!(cards.len(), 3);
/// assert!(cards.iter().all(|c| c.id.is_none()));
/// ```
#[derive(Clone, Debug)]
pub struct CardGenerator {
    rng: GameRng,
}

impl CardGenerator {
    /// Create a generator drawing from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Draw the next target card.
    pub fn generate(&mut self) -> Card {
        let color = Color::ALL[self.rng.gen_index(Color::ALL.len())];
        let shape = Shape::ALL[self.rng.gen_index(Shape::ALL.len())];
        let number = self.rng.gen_inclusive(NUMBER_RANGE);
        let size = Size::ALL[self.rng.gen_index(Size::ALL.len())];
        Card::new(color, shape, number, size)
    }

    /// The underlying RNG, for checkpointing.
    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }
}

impl Iterator for CardGenerator {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_generated_cards_are_valid() {
        let mut generator = CardGenerator::new(GameRng::new(5));
        for _ in 0..1000 {
            let card = generator.generate();
            assert!(card.validate().is_ok());
            assert!(card.id.is_none());
        }
    }

    #[test]
    fn test_covers_every_value() {
        let cards: Vec<_> = CardGenerator::new(GameRng::new(11)).take(2000).collect();

        let colors: FxHashSet<_> = cards.iter().map(|c| c.color).collect();
        let shapes: FxHashSet<_> = cards.iter().map(|c| c.shape).collect();
        let numbers: FxHashSet<_> = cards.iter().map(|c| c.number).collect();
        let sizes: FxHashSet<_> = cards.iter().map(|c| c.size).collect();

        assert_eq!(colors.len(), 4);
        assert_eq!(shapes.len(), 4);
        assert_eq!(numbers.len(), 4);
        assert_eq!(sizes.len(), 3);
    }

    #[test]
    fn test_roughly_uniform_numbers() {
        let mut counts = [0u32; 5];
        for card in CardGenerator::new(GameRng::new(99)).take(4000) {
            counts[card.number as usize] += 1;
        }
        // Expect ~1000 each.
        for &count in &counts[1..] {
            assert!((800..1200).contains(&count), "skewed count {}", count);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a: Vec<_> = CardGenerator::new(GameRng::new(3)).take(20).collect();
        let b: Vec<_> = CardGenerator::new(GameRng::new(3)).take(20).collect();
        assert_eq!(a, b);
    }
}
