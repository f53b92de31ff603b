//! Error types for session construction and selection handling.
//!
//! Construction errors are fatal: a session with a malformed configuration
//! is never built. `InvalidSelection` is the only error a running session
//! returns, and it never mutates session state.

use thiserror::Error;

use crate::cards::CardId;

/// Errors produced by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WcstError {
    /// A selection referenced a card that is not in the reference set.
    #[error("invalid selection: {0} is not a reference card")]
    InvalidSelection(CardId),

    /// The reference set does not contain exactly four cards.
    #[error("reference set must contain exactly {expected} cards, got {actual}")]
    WrongReferenceCount {
        /// Required number of reference cards.
        expected: usize,
        /// Number of cards supplied.
        actual: usize,
    },

    /// A reference card was supplied without an id.
    #[error("reference card at position {0} has no id")]
    MissingReferenceId(usize),

    /// Two reference cards share an id.
    #[error("duplicate reference card id {0}")]
    DuplicateReferenceId(CardId),

    /// A card number lies outside `1..=4`.
    #[error("card number {0} outside 1..=4")]
    NumberOutOfRange(u8),

    /// `cards_per_rule_change` was zero.
    #[error("cards_per_rule_change must be greater than zero")]
    ZeroRuleChangeThreshold,

    /// Strict mode rejected a reference set where one rule value maps to
    /// more than one reference card.
    #[error("ambiguous reference set: {count} cards share {rule} value {value}")]
    AmbiguousReferenceSet {
        /// Rule under which the collision occurs.
        rule: crate::rules::Rule,
        /// Shared attribute value, rendered for display.
        value: String,
        /// Number of reference cards sharing it.
        count: usize,
    },

    /// Configuration JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for WcstError {
    fn from(err: serde_json::Error) -> Self {
        WcstError::Config(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, WcstError>;
