//! Session-wide counters.

use serde::{Deserialize, Serialize};

use crate::rules::{AdaptiveEvent, Evaluation};

/// Counters for one session.
///
/// Everything except `streak` only ever grows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Evaluated selections.
    pub attempts: u32,

    /// Selections that matched under the current rule.
    pub correct: u32,

    /// Errors that would have been correct under the previous rule.
    pub perseverative_errors: u32,

    /// Hidden-rule switches so far.
    pub rule_changes: u32,

    /// Consecutive correct answers under the current rule.
    pub streak: u32,
}

impl GameStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Incorrect selections.
    #[must_use]
    pub fn errors(&self) -> u32 {
        self.attempts - self.correct
    }

    /// Errors that were not perseverative.
    #[must_use]
    pub fn non_perseverative_errors(&self) -> u32 {
        self.errors() - self.perseverative_errors
    }

    /// Fraction of attempts answered correctly.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.correct as f64 / self.attempts as f64
        }
    }

    /// Fraction of attempts that were perseverative errors.
    #[must_use]
    pub fn perseverative_error_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.perseverative_errors as f64 / self.attempts as f64
        }
    }
}

/// Accumulates `GameStats` from evaluated rounds.
#[derive(Clone, Debug, Default)]
pub struct StatsTracker {
    stats: GameStats,
}

impl StatsTracker {
    /// Create a tracker with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> GameStats {
        self.stats
    }

    /// Fold one round into the counters.
    ///
    /// `events` are the adaptive controller's events for the same round and
    /// `streak` its streak after the transition.
    pub fn record(&mut self, evaluation: Evaluation, events: &[AdaptiveEvent], streak: u32) -> GameStats {
        self.stats.attempts += 1;
        if evaluation.correct {
            self.stats.correct += 1;
        }
        if evaluation.perseverative {
            self.stats.perseverative_errors += 1;
        }
        for event in events {
            match event {
                AdaptiveEvent::RuleChanged { .. } => self.stats.rule_changes += 1,
            }
        }
        self.stats.streak = streak;
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    const CORRECT: Evaluation = Evaluation {
        correct: true,
        perseverative: false,
    };
    const WRONG: Evaluation = Evaluation {
        correct: false,
        perseverative: false,
    };
    const PERSEVERATIVE: Evaluation = Evaluation {
        correct: false,
        perseverative: true,
    };

    #[test]
    fn test_stats_default() {
        let stats = GameStats::new();
        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.accuracy(), 0.0);
        assert_eq!(stats.perseverative_error_rate(), 0.0);
    }

    #[test]
    fn test_record_counts() {
        let mut tracker = StatsTracker::new();
        tracker.record(CORRECT, &[], 1);
        tracker.record(CORRECT, &[], 2);
        tracker.record(WRONG, &[], 0);
        let stats = tracker.record(PERSEVERATIVE, &[], 0);

        assert_eq!(stats.attempts, 4);
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.errors(), 2);
        assert_eq!(stats.perseverative_errors, 1);
        assert_eq!(stats.non_perseverative_errors(), 1);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.accuracy(), 0.5);
        assert_eq!(stats.perseverative_error_rate(), 0.25);
    }

    #[test]
    fn test_rule_change_counted_once_per_event() {
        let mut tracker = StatsTracker::new();
        let switch = [AdaptiveEvent::RuleChanged {
            from: Rule::Color,
            to: Rule::Shape,
        }];

        let stats = tracker.record(CORRECT, &switch, 0);
        assert_eq!(stats.rule_changes, 1);
        assert_eq!(stats.streak, 0);

        let stats = tracker.record(CORRECT, &[], 1);
        assert_eq!(stats.rule_changes, 1);
        assert_eq!(tracker.stats(), stats);
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = GameStats::new();
        stats.attempts = 42;
        stats.rule_changes = 3;

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: GameStats = serde_json::from_str(&json).unwrap();

        assert_eq!(stats, deserialized);
    }
}
