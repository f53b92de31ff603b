//! Session statistics.

pub mod tracker;

pub use tracker::{GameStats, StatsTracker};
