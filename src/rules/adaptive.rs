//! Streak-driven rule switching.
//!
//! `RuleState::transition` is a pure step `(state, is_correct) -> (state,
//! events)`; the only input besides the answer is the RNG used to pick the
//! next rule. `AdaptiveController` owns a state and applies each step in
//! place, so callers never see a streak that has advanced without its
//! pending switch.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::info;

use super::engine::Rule;
use crate::core::GameRng;

/// Rule bookkeeping for one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleState {
    /// Rule that currently decides correctness.
    pub current_rule: Rule,
    /// Rule in force before the last switch. `None` until the first switch.
    pub previous_rule: Option<Rule>,
    /// Consecutive correct answers under `current_rule`.
    pub streak: u32,
}

/// Something the transition wants the session to know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdaptiveEvent {
    /// The hidden rule changed.
    RuleChanged { from: Rule, to: Rule },
}

/// Events from a single transition. At most one switch happens per round.
pub type AdaptiveEvents = SmallVec<[AdaptiveEvent; 1]>;

impl RuleState {
    /// Session-start state.
    #[must_use]
    pub const fn initial(starting_rule: Rule) -> Self {
        Self {
            current_rule: starting_rule,
            previous_rule: None,
            streak: 0,
        }
    }

    /// Compute the state after one evaluated answer.
    ///
    /// A correct answer extends the streak; when the streak reaches a
    /// multiple of `threshold` the rule switches to one of the other three,
    /// uniformly, and the streak resets. An incorrect answer resets the
    /// streak and never switches.
    #[must_use]
    pub fn transition(
        &self,
        is_correct: bool,
        threshold: u32,
        rng: &mut GameRng,
    ) -> (RuleState, AdaptiveEvents) {
        let mut events = AdaptiveEvents::new();

        if !is_correct {
            return (
                RuleState {
                    streak: 0,
                    ..*self
                },
                events,
            );
        }

        let streak = self.streak + 1;
        if threshold > 0 && streak % threshold == 0 {
            let others = self.current_rule.others();
            let to = others[rng.gen_index(others.len())];
            events.push(AdaptiveEvent::RuleChanged {
                from: self.current_rule,
                to,
            });
            let next = RuleState {
                current_rule: to,
                previous_rule: Some(self.current_rule),
                streak: 0,
            };
            return (next, events);
        }

        (RuleState { streak, ..*self }, events)
    }
}

/// Owns the rule state and its RNG stream.
#[derive(Clone, Debug)]
pub struct AdaptiveController {
    state: RuleState,
    threshold: u32,
    rng: GameRng,
}

impl AdaptiveController {
    /// Create a controller.
    ///
    /// `threshold` is `cards_per_rule_change`; configuration validation
    /// guarantees it is non-zero.
    #[must_use]
    pub fn new(starting_rule: Rule, threshold: u32, rng: GameRng) -> Self {
        Self {
            state: RuleState::initial(starting_rule),
            threshold,
            rng,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> RuleState {
        self.state
    }

    /// Correct answers needed per switch.
    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Apply one answer and return the emitted events.
    pub fn record(&mut self, is_correct: bool) -> AdaptiveEvents {
        let (next, events) = self.state.transition(is_correct, self.threshold, &mut self.rng);
        for event in &events {
            let AdaptiveEvent::RuleChanged { from, to } = event;
            info!(%from, %to, "rule changed");
        }
        self.state = next;
        events
    }
}
