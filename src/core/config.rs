//! Session configuration.
//!
//! Supplied once at session construction and never re-read. Every field has
//! a default, so a JSON document only needs the fields it overrides:
//!
//! ```
//! use wcst_engine::core::SessionConfig;
//!
//! let config = SessionConfig::from_json(r#"{ "feedback_delay_ms": 250 }"#).unwrap();
//! assert_eq!(config.feedback_delay_ms, 250);
//! assert_eq!(config.cards_per_rule_change, 5);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{Result, WcstError};
use crate::cards::ReferenceSet;
use crate::rules::Rule;

/// Consecutive correct answers before the hidden rule changes.
pub const DEFAULT_CARDS_PER_RULE_CHANGE: u32 = 5;

/// Feedback lockout after each evaluated selection.
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 1000;

/// Configuration for a single session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Correct streak length that triggers a rule switch. Must be > 0.
    pub cards_per_rule_change: u32,

    /// Lockout between an evaluation and the next target.
    pub feedback_delay_ms: u64,

    /// The four cards targets are sorted against.
    pub reference_cards: ReferenceSet,

    /// Hidden rule at session start.
    pub starting_rule: Rule,

    /// RNG seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Reject reference sets where a rule value maps to several cards.
    pub strict_reference_set: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cards_per_rule_change: DEFAULT_CARDS_PER_RULE_CHANGE,
            feedback_delay_ms: DEFAULT_FEEDBACK_DELAY_MS,
            reference_cards: ReferenceSet::default(),
            starting_rule: Rule::Color,
            seed: None,
            strict_reference_set: false,
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from JSON. Missing fields take defaults.
    ///
    /// The result is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the rule-change threshold.
    #[must_use]
    pub fn with_cards_per_rule_change(mut self, n: u32) -> Self {
        self.cards_per_rule_change = n;
        self
    }

    /// Set the feedback lockout.
    #[must_use]
    pub fn with_feedback_delay_ms(mut self, ms: u64) -> Self {
        self.feedback_delay_ms = ms;
        self
    }

    /// Set the reference cards.
    #[must_use]
    pub fn with_reference_cards(mut self, cards: ReferenceSet) -> Self {
        self.reference_cards = cards;
        self
    }

    /// Set the starting rule.
    #[must_use]
    pub fn with_starting_rule(mut self, rule: Rule) -> Self {
        self.starting_rule = rule;
        self
    }

    /// Set a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable strict reference-set checking.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_reference_set = strict;
        self
    }

    /// Check every construction-time invariant.
    ///
    /// Ambiguities in the reference set are logged, and only rejected when
    /// `strict_reference_set` is on.
    pub fn validate(&self) -> Result<()> {
        if self.cards_per_rule_change == 0 {
            return Err(WcstError::ZeroRuleChangeThreshold);
        }

        self.reference_cards.validate()?;

        for ambiguity in self.reference_cards.ambiguities() {
            if self.strict_reference_set {
                return Err(WcstError::AmbiguousReferenceSet {
                    rule: ambiguity.rule,
                    value: ambiguity.value,
                    count: ambiguity.cards.len(),
                });
            }
            warn!(
                rule = %ambiguity.rule,
                value = %ambiguity.value,
                cards = ambiguity.cards.len(),
                "reference set is ambiguous; any matching card counts as correct"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Color, Shape, Size};

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.cards_per_rule_change, 5);
        assert_eq!(config.feedback_delay_ms, 1000);
        assert_eq!(config.starting_rule, Rule::Color);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SessionConfig::default()
            .with_cards_per_rule_change(3)
            .with_feedback_delay_ms(0)
            .with_starting_rule(Rule::Shape)
            .with_seed(99);

        assert_eq!(config.cards_per_rule_change, 3);
        assert_eq!(config.feedback_delay_ms, 0);
        assert_eq!(config.starting_rule, Rule::Shape);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = SessionConfig::default().with_cards_per_rule_change(0);
        assert_eq!(config.validate(), Err(WcstError::ZeroRuleChangeThreshold));
    }

    #[test]
    fn test_strict_rejects_default_set() {
        let config = SessionConfig::default().strict(true);
        match config.validate() {
            Err(WcstError::AmbiguousReferenceSet { rule, value, count }) => {
                assert_eq!(rule, Rule::Size);
                assert_eq!(value, "medium");
                assert_eq!(count, 2);
            }
            other => panic!("expected ambiguity error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_partial() {
        let config = SessionConfig::from_json(
            r#"{ "cards_per_rule_change": 10, "starting_rule": "number", "seed": 7 }"#,
        )
        .unwrap();

        assert_eq!(config.cards_per_rule_change, 10);
        assert_eq!(config.starting_rule, Rule::Number);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.feedback_delay_ms, DEFAULT_FEEDBACK_DELAY_MS);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        let err = SessionConfig::from_json(r#"{ "cards_per_rule_change": 0 }"#).unwrap_err();
        assert_eq!(err, WcstError::ZeroRuleChangeThreshold);

        let err = SessionConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, WcstError::Config(_)));
    }

    #[test]
    fn test_from_json_reference_cards_out_of_range() {
        let json = r#"{
            "reference_cards": [
                { "id": 0, "color": "red", "shape": "circle", "number": 9, "size": "small" },
                { "id": 1, "color": "green", "shape": "triangle", "number": 2, "size": "medium" },
                { "id": 2, "color": "blue", "shape": "star", "number": 3, "size": "large" },
                { "id": 3, "color": "yellow", "shape": "square", "number": 4, "size": "medium" }
            ]
        }"#;

        let err = SessionConfig::from_json(json).unwrap_err();
        assert_eq!(err, WcstError::NumberOutOfRange(9));
    }

    #[test]
    fn test_serialization() {
        let config = SessionConfig::default()
            .with_seed(123)
            .with_reference_cards(ReferenceSet::default());
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_custom_reference_set() {
        let cards = vec![
            Card::new(Color::Red, Shape::Circle, 1, Size::Small).with_id(CardId::new(10)),
            Card::new(Color::Green, Shape::Triangle, 2, Size::Medium).with_id(CardId::new(11)),
            Card::new(Color::Blue, Shape::Star, 3, Size::Large).with_id(CardId::new(12)),
            Card::new(Color::Yellow, Shape::Square, 4, Size::Large).with_id(CardId::new(13)),
        ];
        let set = ReferenceSet::new(cards).unwrap();
        let config = SessionConfig::default().with_reference_cards(set);
        assert!(config.validate().is_ok());
    }
}
