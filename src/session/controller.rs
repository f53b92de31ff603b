//! Round orchestration and feedback lockout.
//!
//! A `Session` deals a target, accepts one selection, scores it, updates the
//! rule state and counters in the same call, then locks until the feedback
//! delay has elapsed. The lockout is a deadline checked against the
//! session's `Clock`. Nothing sleeps: `poll` (also run at the top of
//! `submit_selection`) notices the deadline and deals the next target.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::event::{Feedback, SessionEvent, SessionObserver};
use crate::cards::{Card, CardGenerator, CardId, ReferenceSet};
use crate::core::{Clock, GameRng, Result, SessionConfig, SystemClock, WcstError};
use crate::rules::{evaluate, AdaptiveController, AdaptiveEvent, Rule, RuleState};
use crate::stats::{GameStats, StatsTracker};

/// Where the session is within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No target has been dealt yet.
    Idle,
    /// A target is live and the next selection will be scored.
    AwaitingSelection,
    /// Feedback is showing; selections are ignored until `until_ms`.
    Locked { until_ms: u64 },
}

/// Why a selection was dropped without effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Inside the feedback lockout.
    Locked,
    /// No target has been dealt.
    NoActiveTarget,
}

/// Everything that happened in one evaluated round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub target: Card,
    pub selected: CardId,
    pub feedback: Feedback,
    pub perseverative: bool,
    /// `(from, to)` when this round triggered a rule switch.
    pub rule_change: Option<(Rule, Rule)>,
    /// Rule state after the round.
    pub rule_state: RuleState,
    /// Counters after the round.
    pub stats: GameStats,
}

/// Result of `Session::submit_selection`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    Evaluated(RoundResult),
    Ignored(IgnoreReason),
}

impl SelectionOutcome {
    /// The round result, if the selection was scored.
    #[must_use]
    pub fn evaluated(&self) -> Option<&RoundResult> {
        match self {
            SelectionOutcome::Evaluated(result) => Some(result),
            SelectionOutcome::Ignored(_) => None,
        }
    }
}

/// Snapshot a collaborator can persist at the end of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub rounds_dealt: u64,
    pub rule_state: RuleState,
    pub stats: GameStats,
}

/// One subject's run through the task.
///
/// ## Example
///
/// ```
/// use wcst_engine::core::{ManualClock, SessionConfig};
/// use wcst_engine::session::{Session, SelectionOutcome};
///
/// let clock = ManualClock::new();
/// let config = SessionConfig::default().with_seed(42);
/// let mut session = Session::with_clock(config, clock.clone()).unwrap();
///
/// let target = session.start_round();
/// let pick = session
///     .reference_cards()
///     .expected_for(&target, session.rule_state().current_rule)
///     .and_then(|card| card.id)
///     .unwrap();
///
/// let outcome = session.submit_selection(pick).unwrap();
/// assert!(outcome.evaluated().unwrap().feedback.is_correct());
///
/// // Locked until the feedback delay passes.
/// assert!(matches!(session.submit_selection(pick).unwrap(), SelectionOutcome::Ignored(_)));
/// clock.advance(1000);
/// assert!(session.poll());
/// ```
pub struct Session<C: Clock = SystemClock> {
    config: SessionConfig,
    seed: u64,
    clock: C,
    generator: CardGenerator,
    controller: AdaptiveController,
    tracker: StatsTracker,
    phase: RoundPhase,
    target: Option<Card>,
    rounds_dealt: u64,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session<SystemClock> {
    /// Build a session on wall-clock time.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> Session<C> {
    /// Build a session on the given clock.
    ///
    /// Fails if the configuration is malformed; no session is created.
    pub fn with_clock(config: SessionConfig, clock: C) -> Result<Self> {
        config.validate()?;

        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let seed = rng.seed();
        let generator = CardGenerator::new(rng.for_context("targets"));
        let controller = AdaptiveController::new(
            config.starting_rule,
            config.cards_per_rule_change,
            rng.for_context("rules"),
        );

        info!(
            seed,
            starting_rule = %config.starting_rule,
            cards_per_rule_change = config.cards_per_rule_change,
            feedback_delay_ms = config.feedback_delay_ms,
            "session created"
        );

        Ok(Self {
            config,
            seed,
            clock,
            generator,
            controller,
            tracker: StatsTracker::new(),
            phase: RoundPhase::Idle,
            target: None,
            rounds_dealt: 0,
            observers: Vec::new(),
        })
    }

    /// Register an observer. Observers are called in registration order.
    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Deal a random target and wait for a selection.
    ///
    /// Calling this during a lockout ends the lockout early.
    pub fn start_round(&mut self) -> Card {
        let card = self.generator.generate();
        self.begin_round(card);
        card
    }

    /// Deal a specific target instead of a random one.
    ///
    /// For scripted decks and replays. Any id on `card` is dropped.
    pub fn present_target(&mut self, card: Card) -> Result<()> {
        card.validate()?;
        self.begin_round(Card { id: None, ..card });
        Ok(())
    }

    /// End the lockout if its deadline has passed.
    ///
    /// Returns true if a new round was dealt.
    pub fn poll(&mut self) -> bool {
        match self.phase {
            RoundPhase::Locked { until_ms } if self.clock.now_ms() >= until_ms => {
                self.start_round();
                true
            }
            _ => false,
        }
    }

    /// Score a selection of the reference card `id` against the live target.
    ///
    /// Ignored without side effects while locked or before the first
    /// target. Unknown ids are rejected with `InvalidSelection`, also without
    /// side effects.
    pub fn submit_selection(&mut self, id: CardId) -> Result<SelectionOutcome> {
        self.poll();

        let target = match (self.phase, self.target) {
            (RoundPhase::Locked { .. }, _) => {
                debug!(%id, "selection ignored during lockout");
                return Ok(SelectionOutcome::Ignored(IgnoreReason::Locked));
            }
            (RoundPhase::AwaitingSelection, Some(target)) => target,
            _ => {
                debug!(%id, "selection ignored without an active target");
                return Ok(SelectionOutcome::Ignored(IgnoreReason::NoActiveTarget));
            }
        };

        let Some(&selected) = self.config.reference_cards.get(id) else {
            warn!(%id, "selection does not name a reference card");
            return Err(WcstError::InvalidSelection(id));
        };

        let before = self.controller.state();
        let evaluation = evaluate(&target, &selected, before.current_rule, before.previous_rule);
        let events = self.controller.record(evaluation.correct);
        let rule_state = self.controller.state();
        let stats = self.tracker.record(evaluation, &events, rule_state.streak);

        let until_ms = self.clock.now_ms().saturating_add(self.config.feedback_delay_ms);
        self.phase = RoundPhase::Locked { until_ms };

        let feedback = Feedback::from_correct(evaluation.correct);
        debug!(
            %target,
            %id,
            rule = %before.current_rule,
            ?feedback,
            perseverative = evaluation.perseverative,
            streak = rule_state.streak,
            "selection evaluated"
        );

        let mut rule_change = None;
        for event in &events {
            let AdaptiveEvent::RuleChanged { from, to } = *event;
            rule_change = Some((from, to));
            self.emit(SessionEvent::RuleChanged { from, to });
        }
        self.emit(SessionEvent::Feedback(Some(feedback)));
        self.emit(SessionEvent::StatsChanged(stats));

        Ok(SelectionOutcome::Evaluated(RoundResult {
            target,
            selected: id,
            feedback,
            perseverative: evaluation.perseverative,
            rule_change,
            rule_state,
            stats,
        }))
    }

    /// Configuration the session was built with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The reference cards.
    #[must_use]
    pub fn reference_cards(&self) -> &ReferenceSet {
        &self.config.reference_cards
    }

    /// Seed actually in use, including one drawn from entropy.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The target on screen, if any. Stays set during the lockout.
    #[must_use]
    pub fn current_target(&self) -> Option<Card> {
        self.target
    }

    /// Current round phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// True while selections are being ignored.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, RoundPhase::Locked { .. })
    }

    /// Current and previous rule plus the streak.
    #[must_use]
    pub fn rule_state(&self) -> RuleState {
        self.controller.state()
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> GameStats {
        self.tracker.stats()
    }

    /// Serializable snapshot of the session.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            rounds_dealt: self.rounds_dealt,
            rule_state: self.controller.state(),
            stats: self.tracker.stats(),
        }
    }

    fn begin_round(&mut self, card: Card) {
        if self.is_locked() {
            self.emit(SessionEvent::Feedback(None));
        }
        self.target = Some(card);
        self.phase = RoundPhase::AwaitingSelection;
        self.rounds_dealt += 1;
        self.emit(SessionEvent::TargetCardChanged(card));
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}
