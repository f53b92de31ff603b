//! Card system: attributes, card values, reference set, generator.
//!
//! ## Key Types
//!
//! - `Card`: Immutable four-attribute card
//! - `CardId`: Identity of a reference card
//! - `ReferenceSet`: The four fixed cards targets are sorted against
//! - `CardGenerator`: Endless source of random targets

pub mod attributes;
pub mod definition;
pub mod generator;
pub mod reference;

pub use attributes::{AttributeValue, Color, Shape, Size, NUMBER_RANGE};
pub use definition::{Card, CardId};
pub use generator::CardGenerator;
pub use reference::{Ambiguity, ReferenceSet, REFERENCE_CARD_COUNT};
