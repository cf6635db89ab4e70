//! Error types for the trainer engine.

use thiserror::Error;

use crate::round::Stage;

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while driving a trainer session.
///
/// All of these are programming or content-integrity errors, not expected
/// play outcomes — a wrong answer is reported through
/// [`crate::session::AnswerFeedback`], never through this enum.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A generated or authored option set violates a structural invariant.
    #[error("invalid {stage} option set for pattern \"{pattern}\": {message}")]
    InvalidOptionSet {
        /// The pattern the round was built from.
        pattern: String,
        /// The stage whose option set is broken.
        stage: Stage,
        /// What is wrong with the set.
        message: String,
    },

    /// The session has already ended; no further mutation is permitted.
    #[error("session has ended")]
    SessionEnded,

    /// The current round's stage is already `summary`.
    #[error("round is already complete")]
    RoundComplete,

    /// `next_round` was called before the current round reached `summary`.
    #[error("current round is still in the {0} stage")]
    RoundInProgress(Stage),

    /// The submitted option id is not in the current stage's option set.
    #[error("unknown option id: \"{0}\"")]
    UnknownOption(String),

    /// The pattern pool a session draws from is empty.
    #[error("no patterns available for this session")]
    EmptyPatternPool,

    /// Pausing was requested in a mode that does not allow it.
    #[error("pause is not allowed in this mode")]
    PauseNotAllowed,

    /// An empty or inverted range was passed to the RNG.
    #[error("invalid rng range: [{min}, {max})")]
    InvalidRange {
        /// Inclusive lower bound.
        min: u32,
        /// Exclusive upper bound.
        max: u32,
    },
}
