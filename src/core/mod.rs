//! Core engine plumbing: RNG, clock, configuration, errors.
//!
//! Nothing here knows about rules or scoring. The session wires these
//! together with the card and rule modules.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{SessionConfig, DEFAULT_CARDS_PER_RULE_CHANGE, DEFAULT_FEEDBACK_DELAY_MS};
pub use error::{Result, WcstError};
pub use rng::{GameRng, GameRngState};
