//! Hidden rules: matching, evaluation, and adaptive switching.
//!
//! - `engine`: `Rule`, the stateless `matches` comparator, and per-round
//!   `evaluate`
//! - `adaptive`: the streak counter and rule-switch state machine

pub mod adaptive;
pub mod engine;

pub use adaptive::{AdaptiveController, AdaptiveEvent, AdaptiveEvents, RuleState};
pub use engine::{evaluate, matches, Evaluation, Rule};
