//! Sessions: round orchestration, lockout, and collaborator events.
//!
//! A presentation layer owns a `Session`, registers `SessionObserver`s,
//! calls `start_round` once, and then forwards the subject's choices to
//! `submit_selection` while calling `poll` from its frame or timer loop.

pub mod controller;
pub mod event;

pub use controller::{
    IgnoreReason, RoundPhase, RoundResult, SelectionOutcome, Session, SessionSummary,
};
pub use event::{EventLog, Feedback, SessionEvent, SessionObserver};
