//! # wcst-engine
//!
//! An adaptive card-sorting engine modeled on the Wisconsin Card Sorting
//! Test.
//!
//! A subject sorts random target cards against four fixed reference cards
//! by a hidden rule (color, shape, number or size). After a run of correct
//! answers the rule changes without notice. The engine scores each
//! selection, tracks perseverative errors (answers that follow the rule
//! just abandoned), and locks out selections while feedback is shown.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine sees reference-card ids, never
//!    pointer coordinates or meshes. Collaborators observe `SessionEvent`s.
//!
//! 2. **Pure Transitions**: Rule switching is a pure step over `RuleState`;
//!    the session applies each step and its counters in one call.
//!
//! 3. **Deterministic When Seeded**: Targets and rule switches draw from
//!    separate seeded streams, so runs replay exactly.
//!
//! ## Modules
//!
//! - `core`: RNG, clock, configuration, errors
//! - `cards`: Card values, reference set, target generator
//! - `rules`: Matching, evaluation, adaptive rule switching
//! - `stats`: Session counters
//! - `session`: Round orchestration, lockout, events

pub mod core;
pub mod cards;
pub mod rules;
pub mod stats;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Clock, ManualClock, SystemClock,
    GameRng, GameRngState,
    SessionConfig, Result, WcstError,
};

pub use crate::cards::{
    Card, CardId, CardGenerator, ReferenceSet, Ambiguity,
    AttributeValue, Color, Shape, Size,
};

pub use crate::rules::{matches, evaluate, Evaluation, Rule, RuleState, AdaptiveController, AdaptiveEvent};

pub use crate::stats::{GameStats, StatsTracker};

pub use crate::session::{
    Session, SessionSummary, RoundPhase, RoundResult, SelectionOutcome, IgnoreReason,
    SessionEvent, SessionObserver, EventLog, Feedback,
};
