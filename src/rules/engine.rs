//! Matching rules and round evaluation.
//!
//! A `Rule` selects one attribute dimension. Two cards match under a rule
//! iff they share that attribute. `evaluate` scores one selection against
//! the active rule and, when one exists, the rule it replaced.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Hidden sorting rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    Color,
    Shape,
    Number,
    Size,
}

impl Rule {
    /// All rules.
    pub const ALL: [Rule; 4] = [Rule::Color, Rule::Shape, Rule::Number, Rule::Size];

    /// The three rules other than `self`, in `ALL` order.
    #[must_use]
    pub fn others(self) -> [Rule; 3] {
        let mut out = [self; 3];
        let mut i = 0;
        for rule in Rule::ALL {
            if rule != self {
                out[i] = rule;
                i += 1;
            }
        }
        out
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rule::Color => "color",
            Rule::Shape => "shape",
            Rule::Number => "number",
            Rule::Size => "size",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// True iff `a` and `b` share the attribute `rule` selects.
#[must_use]
pub fn matches(a: &Card, b: &Card, rule: Rule) -> bool {
    a.attribute(rule) == b.attribute(rule)
}

/// Outcome of scoring one selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Match under the current rule.
    pub correct: bool,
    /// Wrong under the current rule but right under the previous one.
    pub perseverative: bool,
}

/// Score `selected` against `target`.
///
/// Perseveration is only possible once a previous rule exists.
#[must_use]
pub fn evaluate(target: &Card, selected: &Card, current: Rule, previous: Option<Rule>) -> Evaluation {
    let correct = matches(target, selected, current);
    let perseverative =
        !correct && previous.is_some_and(|rule| matches(target, selected, rule));
    Evaluation {
        correct,
        perseverative,
    }
}
