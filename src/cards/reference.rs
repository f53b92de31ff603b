//! The fixed set of reference cards targets are sorted against.
//!
//! `ReferenceSet` stores the four cards in presentation order and indexes
//! them by `CardId`. It deserializes from a plain JSON array of cards;
//! deserialization builds the index but does not validate, so configuration
//! errors surface from [`ReferenceSet::validate`] with a precise cause.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{AttributeValue, Color, Shape, Size};
use super::definition::{Card, CardId};
use crate::core::{Result, WcstError};
use crate::rules::{matches, Rule};

/// Number of reference cards in a session.
pub const REFERENCE_CARD_COUNT: usize = 4;

/// A rule value shared by more than one reference card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ambiguity {
    pub rule: Rule,
    /// The shared value, rendered for display.
    pub value: String,
    /// Every reference card showing that value, in set order.
    pub cards: SmallVec<[CardId; REFERENCE_CARD_COUNT]>,
}

/// The four reference cards.
///
/// ## Example
///
/// ```
/// use wcst_engine::cards::{CardId, Color, ReferenceSet};
///
/// let set = ReferenceSet::default();
/// assert_eq!(set.len(), 4);
/// assert_eq!(set.get(CardId::new(0)).unwrap().color, Color::Red);
/// assert!(set.get(CardId::new(9)).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Card>", into = "Vec<Card>")]
pub struct ReferenceSet {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl ReferenceSet {
    /// Build and validate a reference set.
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        let set = Self::from(cards);
        set.validate()?;
        Ok(set)
    }

    /// Check count, ids and attribute domains.
    pub fn validate(&self) -> Result<()> {
        if self.cards.len() != REFERENCE_CARD_COUNT {
            return Err(WcstError::WrongReferenceCount {
                expected: REFERENCE_CARD_COUNT,
                actual: self.cards.len(),
            });
        }

        let mut seen: SmallVec<[CardId; REFERENCE_CARD_COUNT]> = SmallVec::new();
        for (position, card) in self.cards.iter().enumerate() {
            let id = card.id.ok_or(WcstError::MissingReferenceId(position))?;
            if seen.contains(&id) {
                return Err(WcstError::DuplicateReferenceId(id));
            }
            seen.push(id);
            card.validate()?;
        }

        Ok(())
    }

    /// Get a reference card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    /// Check if a card ID is in the set.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    /// Cards in presentation order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over the cards in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Every reference card matching `target` under `rule`.
    pub fn matching<'a>(&'a self, target: &'a Card, rule: Rule) -> impl Iterator<Item = &'a Card> {
        self.cards.iter().filter(move |c| matches(c, target, rule))
    }

    /// The card a subject applying `rule` should pick. First match wins.
    #[must_use]
    pub fn expected_for<'a>(&'a self, target: &'a Card, rule: Rule) -> Option<&'a Card> {
        self.matching(target, rule).next()
    }

    /// Rule values that map to more than one reference card.
    #[must_use]
    pub fn ambiguities(&self) -> Vec<Ambiguity> {
        let mut found = Vec::new();

        for rule in Rule::ALL {
            let mut groups: Vec<(AttributeValue, SmallVec<[CardId; REFERENCE_CARD_COUNT]>)> =
                Vec::new();

            for card in &self.cards {
                let Some(id) = card.id else { continue };
                let value = card.attribute(rule);
                match groups.iter_mut().find(|(v, _)| *v == value) {
                    Some((_, ids)) => ids.push(id),
                    None => groups.push((value, SmallVec::from_elem(id, 1))),
                }
            }

            found.extend(groups.into_iter().filter(|(_, ids)| ids.len() > 1).map(
                |(value, cards)| Ambiguity {
                    rule,
                    value: value.to_string(),
                    cards,
                },
            ));
        }

        found
    }
}

impl Default for ReferenceSet {
    /// red/circle/1/small, green/triangle/2/medium, blue/star/3/large,
    /// yellow/square/4/medium with ids 0..=3.
    ///
    /// The two `medium` cards make the size rule ambiguous.
    fn default() -> Self {
        Self::from(vec![
            Card::new(Color::Red, Shape::Circle, 1, Size::Small).with_id(CardId::new(0)),
            Card::new(Color::Green, Shape::Triangle, 2, Size::Medium).with_id(CardId::new(1)),
            Card::new(Color::Blue, Shape::Star, 3, Size::Large).with_id(CardId::new(2)),
            Card::new(Color::Yellow, Shape::Square, 4, Size::Medium).with_id(CardId::new(3)),
        ])
    }
}

impl From<Vec<Card>> for ReferenceSet {
    fn from(cards: Vec<Card>) -> Self {
        let index = cards
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.id.map(|id| (id, i)))
            .collect();
        Self { cards, index }
    }
}

impl From<ReferenceSet> for Vec<Card> {
    fn from(set: ReferenceSet) -> Self {
        set.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(color: Color, shape: Shape, number: u8, size: Size, id: u32) -> Card {
        Card::new(color, shape, number, size).with_id(CardId::new(id))
    }

    #[test]
    fn test_default_set() {
        let set = ReferenceSet::default();
        assert!(set.validate().is_ok());
        assert_eq!(set.len(), 4);
        assert!(!set.is_empty());

        let ids: Vec<_> = set.iter().filter_map(|c| c.id).collect();
        assert_eq!(ids, vec![CardId::new(0), CardId::new(1), CardId::new(2), CardId::new(3)]);
        assert_eq!(set.get(CardId::new(3)).unwrap().shape, Shape::Square);
        assert!(set.contains(CardId::new(2)));
        assert!(!set.contains(CardId::new(4)));
    }

    #[test]
    fn test_wrong_count() {
        let err = ReferenceSet::new(vec![card(Color::Red, Shape::Circle, 1, Size::Small, 0)])
            .unwrap_err();
        assert_eq!(err, WcstError::WrongReferenceCount { expected: 4, actual: 1 });
    }

    #[test]
    fn test_duplicate_id() {
        let err = ReferenceSet::new(vec![
            card(Color::Red, Shape::Circle, 1, Size::Small, 0),
            card(Color::Green, Shape::Triangle, 2, Size::Medium, 1),
            card(Color::Blue, Shape::Star, 3, Size::Large, 1),
            card(Color::Yellow, Shape::Square, 4, Size::Medium, 3),
        ])
        .unwrap_err();
        assert_eq!(err, WcstError::DuplicateReferenceId(CardId::new(1)));
    }

    #[test]
    fn test_missing_id() {
        let err = ReferenceSet::new(vec![
            card(Color::Red, Shape::Circle, 1, Size::Small, 0),
            Card::new(Color::Green, Shape::Triangle, 2, Size::Medium),
            card(Color::Blue, Shape::Star, 3, Size::Large, 2),
            card(Color::Yellow, Shape::Square, 4, Size::Medium, 3),
        ])
        .unwrap_err();
        assert_eq!(err, WcstError::MissingReferenceId(1));
    }

    #[test]
    fn test_default_ambiguity_is_size_medium() {
        let ambiguities = ReferenceSet::default().ambiguities();
        assert_eq!(ambiguities.len(), 1);
        assert_eq!(ambiguities[0].rule, Rule::Size);
        assert_eq!(ambiguities[0].value, "medium");
        assert_eq!(ambiguities[0].cards.as_slice(), &[CardId::new(1), CardId::new(3)]);
    }

    #[test]
    fn test_expected_for_first_match_wins() {
        let set = ReferenceSet::default();
        let target = Card::new(Color::Blue, Shape::Circle, 4, Size::Medium);

        assert_eq!(set.expected_for(&target, Rule::Color).and_then(|c| c.id), Some(CardId::new(2)));
        assert_eq!(set.expected_for(&target, Rule::Shape).and_then(|c| c.id), Some(CardId::new(0)));
        assert_eq!(set.expected_for(&target, Rule::Number).and_then(|c| c.id), Some(CardId::new(3)));
        assert_eq!(set.expected_for(&target, Rule::Size).and_then(|c| c.id), Some(CardId::new(1)));
        assert_eq!(set.matching(&target, Rule::Size).count(), 2);
    }

    #[test]
    fn test_every_target_has_a_match() {
        let set = ReferenceSet::default();
        for color in Color::ALL {
            for shape in Shape::ALL {
                for number in 1..=4 {
                    for size in Size::ALL {
                        let target = Card::new(color, shape, number, size);
                        for rule in Rule::ALL {
                            assert!(set.expected_for(&target, rule).is_some());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_serializes_as_card_array() {
        let set = ReferenceSet::default();
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with('['));

        let back: ReferenceSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert_eq!(back.get(CardId::new(1)).unwrap().color, Color::Green);
    }
}
