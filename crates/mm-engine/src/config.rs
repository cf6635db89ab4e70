//! Static trainer configuration: mode profiles and shared constants.
//!
//! Configuration is plain data. The engine reads it and never writes it;
//! [`DEFAULT_CONFIG`] is the profile the shipped trainer runs with.

use serde::{Deserialize, Serialize};

/// The two ways a session can be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Untimed-feeling practice: generous clock, retries, explanations.
    Learning,
    /// Timed assessment: short clock, finite lives, no explanations.
    Exam,
}

impl Mode {
    /// Resolve a mode from user input, case-insensitively.
    ///
    /// Anything other than an explicit request for exam mode resolves to
    /// learning.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("exam") {
            Self::Exam
        } else {
            Self::Learning
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Learning => write!(f, "learning"),
            Self::Exam => write!(f, "exam"),
        }
    }
}

/// The session's lives budget.
///
/// Unlimited lives are a distinct variant, not a numeric sentinel, so
/// comparisons and serialization never have to special-case an infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lives {
    /// A finite number of lives; the session ends when it reaches 0.
    Finite(u32),
    /// Lives are never consumed.
    Unlimited,
}

impl Lives {
    /// Consume one life. Unlimited lives are unaffected; finite lives
    /// floor at 0.
    pub fn lose_one(&mut self) {
        if let Self::Finite(n) = self {
            *n = n.saturating_sub(1);
        }
    }

    /// The remaining count, or `None` when unlimited.
    pub fn remaining(&self) -> Option<u32> {
        match self {
            Self::Finite(n) => Some(*n),
            Self::Unlimited => None,
        }
    }

    /// True when a finite budget is exhausted.
    pub fn is_out(&self) -> bool {
        matches!(self, Self::Finite(0))
    }
}

impl std::fmt::Display for Lives {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Unlimited => write!(f, "∞"),
        }
    }
}

/// Per-mode session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeConfig {
    /// Session-wide countdown budget, in seconds.
    pub session_seconds: u32,
    /// Lives budget.
    pub lives: Lives,
    /// Whether the presentation layer may pause the clock.
    pub allow_pause: bool,
    /// Whether pattern definitions are shown as hints.
    pub allow_hints: bool,
    /// Whether wrong answers surface explanations.
    pub allow_explain: bool,
    /// Seconds deducted from the clock on a wrong answer.
    pub time_penalty_on_wrong: u32,
}

/// How many options each stage's set holds, and how many are correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCounts {
    /// Question-stage set size.
    pub question_options: usize,
    /// Correct entries in the question-stage set.
    pub question_correct: usize,
    /// Problem- and goal-stage set size (1 correct each, per content).
    pub choice_options: usize,
}

/// Scoring constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoring {
    /// Points for a correct stage answer before any bonus.
    pub correct_stage_base: u32,
    /// Extra points per step of the current streak beyond the first.
    pub streak_bonus_step: u32,
    /// Exam mode: end-of-round bonus is `time_left / divisor`; 0 disables.
    pub exam_time_bonus_divisor: u32,
}

/// How the next round's pattern is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternStrategy {
    /// Uniform draw from the enabled pool.
    #[default]
    Random,
    /// Advance one position through the pool, wrapping.
    Sequential,
}

/// Session-level rules shared by both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRules {
    /// Pattern-selection strategy.
    pub pattern_strategy: PatternStrategy,
    /// Exam mode: whether a wrong answer ends the round immediately.
    pub exam_ends_round_on_wrong: bool,
}

/// The complete, immutable trainer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Exam-mode profile.
    pub exam: ModeConfig,
    /// Learning-mode profile.
    pub learning: ModeConfig,
    /// Option-set sizes.
    pub option_counts: OptionCounts,
    /// Scoring constants.
    pub scoring: Scoring,
    /// Session-level rules.
    pub session: SessionRules,
}

/// The shipped trainer profile.
pub const DEFAULT_CONFIG: TrainerConfig = TrainerConfig {
    exam: ModeConfig {
        session_seconds: 180,
        lives: Lives::Finite(3),
        allow_pause: false,
        allow_hints: false,
        allow_explain: false,
        time_penalty_on_wrong: 0,
    },
    learning: ModeConfig {
        session_seconds: 600,
        lives: Lives::Unlimited,
        allow_pause: true,
        allow_hints: true,
        allow_explain: true,
        time_penalty_on_wrong: 3,
    },
    option_counts: OptionCounts {
        question_options: 5,
        question_correct: 2,
        choice_options: 5,
    },
    scoring: Scoring {
        correct_stage_base: 10,
        streak_bonus_step: 5,
        exam_time_bonus_divisor: 10,
    },
    session: SessionRules {
        pattern_strategy: PatternStrategy::Random,
        exam_ends_round_on_wrong: false,
    },
};

impl Default for TrainerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl TrainerConfig {
    /// The profile for a given mode.
    pub fn mode(&self, mode: Mode) -> &ModeConfig {
        match mode {
            Mode::Learning => &self.learning,
            Mode::Exam => &self.exam,
        }
    }

    /// Replace the exam profile.
    pub fn with_exam(mut self, exam: ModeConfig) -> Self {
        self.exam = exam;
        self
    }

    /// Replace the learning profile.
    pub fn with_learning(mut self, learning: ModeConfig) -> Self {
        self.learning = learning;
        self
    }

    /// Replace the scoring constants.
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Replace the session rules.
    pub fn with_session_rules(mut self, session: SessionRules) -> Self {
        self.session = session;
        self
    }
}
