//! Session and round engine for the Meta-Model trainer.
//!
//! Pure state-transition logic: builds rounds from content patterns,
//! validates option sets, applies answers, tracks score/streak/lives/time,
//! and derives the end-of-session report. Deterministic by construction —
//! the same seed and call sequence always replays identically. The engine
//! performs no I/O and holds no global state; everything lives in the
//! [`Session`] passed to each operation.

/// Mode profiles, scoring constants, and session rules.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// End-of-session report derivation.
pub mod report;
/// Deterministic seeded random number generation.
pub mod rng;
/// Rounds, stages, and option-set generation.
pub mod round;
/// The session aggregate and its state machine.
pub mod session;
/// Read-only snapshots for the presentation layer.
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{
    DEFAULT_CONFIG, Lives, Mode, ModeConfig, OptionCounts, PatternStrategy, Scoring, SessionRules,
    TrainerConfig,
};
pub use error::{EngineError, EngineResult};
pub use report::{FamilyReport, SessionReport, WeakPattern, build_report};
pub use rng::{Seed, SeededRng};
pub use round::{
    OptionOrigin, Round, RoundOption, RoundStatus, STAGES, Stage, StageRecord, build_round,
    generate_goal_options, generate_problem_options, generate_question_options,
};
pub use session::{AnswerFeedback, EndReason, Session, SessionInput, StatCounter};
pub use snapshot::{RoundSnapshot, SessionSnapshot};
