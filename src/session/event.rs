//! Events a session emits to its presentation collaborator.
//!
//! ## Design Philosophy
//!
//! The engine never renders anything. A collaborator registers one or more
//! `SessionObserver`s and redraws in response to events. Selections flow
//! back through `Session::submit_selection` as plain `CardId`s; hit-testing
//! stays on the collaborator's side.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use crate::cards::Card;
use crate::rules::Rule;
use crate::stats::GameStats;

/// Result shown to the subject after a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    /// Map a correctness flag to feedback.
    #[must_use]
    pub const fn from_correct(correct: bool) -> Self {
        if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }

    /// True for `Correct`.
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Feedback::Correct)
    }
}

/// Something the collaborator may want to react to.
///
/// After an evaluated selection the order is `RuleChanged` (if any),
/// `Feedback(Some(..))`, `StatsChanged`. When the lockout ends the order is
/// `Feedback(None)`, `TargetCardChanged`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new target is live.
    TargetCardChanged(Card),
    /// Feedback to show, or `None` to clear it.
    Feedback(Option<Feedback>),
    /// Counters after an attempt.
    StatsChanged(GameStats),
    /// The hidden rule switched. Classic presentations ignore this.
    RuleChanged { from: Rule, to: Rule },
}

/// Receives session events.
pub trait SessionObserver {
    /// Called synchronously for each event, in emission order.
    fn on_event(&mut self, event: &SessionEvent);
}

/// Observer that records every event.
///
/// Clones share the same buffer, so keep one handle and give the session
/// the other.
///
/// ```
/// use wcst_engine::session::{EventLog, Session};
/// use wcst_engine::core::SessionConfig;
///
/// let log = EventLog::new();
/// let mut session = Session::new(SessionConfig::default().with_seed(1)).unwrap();
/// session.add_observer(Box::new(log.clone()));
/// session.start_round();
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SessionEvent>>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.borrow().clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl SessionObserver for EventLog {
    fn on_event(&mut self, event: &SessionEvent) {
        self.events.borrow_mut().push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, Shape, Size};

    #[test]
    fn test_feedback_from_correct() {
        assert_eq!(Feedback::from_correct(true), Feedback::Correct);
        assert_eq!(Feedback::from_correct(false), Feedback::Incorrect);
        assert!(Feedback::Correct.is_correct());
        assert!(!Feedback::Incorrect.is_correct());
    }

    #[test]
    fn test_event_log_shared_buffer() {
        let log = EventLog::new();
        let mut observer = log.clone();

        observer.on_event(&SessionEvent::Feedback(None));
        observer.on_event(&SessionEvent::Feedback(Some(Feedback::Correct)));

        assert_eq!(log.len(), 2);
        assert_eq!(log.take().len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let event = SessionEvent::TargetCardChanged(Card::new(Color::Red, Shape::Star, 2, Size::Small));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"target_card_changed\""));
        assert_eq!(serde_json::from_str::<SessionEvent>(&json).unwrap(), event);

        let event = SessionEvent::RuleChanged {
            from: Rule::Color,
            to: Rule::Size,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(serde_json::from_str::<SessionEvent>(&json).unwrap(), event);
    }
}
