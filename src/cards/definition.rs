//! Card values.
//!
//! `Card` is an immutable, `Copy` value. Its `id` only correlates a
//! selection with a reference card. Generated target cards have none, and
//! ids never take part in matching.

use serde::{Deserialize, Serialize};

use super::attributes::{AttributeValue, Color, Shape, Size, NUMBER_RANGE};
use crate::core::{Result, WcstError};
use crate::rules::Rule;

/// Identifier for a reference card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card with four classifiable attributes.
///
/// ```
/// use wcst_engine::cards::{Card, Color, Shape, Size};
/// use wcst_engine::rules::Rule;
///
/// let card = Card::new(Color::Red, Shape::Circle, 1, Size::Small);
/// assert_eq!(card.attribute(Rule::Number).to_string(), "1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Reference-card identity. `None` for targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CardId>,
    pub color: Color,
    pub shape: Shape,
    /// Symbol count, `1..=4`.
    pub number: u8,
    pub size: Size,
}

impl Card {
    /// Create a card without an id.
    ///
    /// `number` is not checked here; see [`Card::validate`].
    #[must_use]
    pub const fn new(color: Color, shape: Shape, number: u8, size: Size) -> Self {
        Self {
            id: None,
            color,
            shape,
            number,
            size,
        }
    }

    /// Attach an id (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: CardId) -> Self {
        self.id = Some(id);
        self
    }

    /// The attribute this card shows under `rule`.
    #[must_use]
    pub const fn attribute(&self, rule: Rule) -> AttributeValue {
        match rule {
            Rule::Color => AttributeValue::Color(self.color),
            Rule::Shape => AttributeValue::Shape(self.shape),
            Rule::Number => AttributeValue::Number(self.number),
            Rule::Size => AttributeValue::Size(self.size),
        }
    }

    /// Check that every attribute lies in its domain.
    pub fn validate(&self) -> Result<()> {
        if !NUMBER_RANGE.contains(&self.number) {
            return Err(WcstError::NumberOutOfRange(self.number));
        }
        Ok(())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}/{}", self.color, self.shape, self.number, self.size)
    }
}
