//! Pattern types: the teaching units of the Meta-Model trainer.
//!
//! A [`Pattern`] describes a single linguistic violation (e.g. an unspecified
//! verb or a mind-reading distortion) together with the authored content a
//! round is built from: clarifying questions, trap questions, and the two
//! five-option multiple-choice pools.

use serde::{Deserialize, Serialize};

/// Coarse grouping of patterns used for aggregate reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Information left out of the statement (השמטה).
    Deletion,
    /// Meaning imposed on the statement (עיוות).
    Distortion,
    /// A specific experience stretched to a universal rule (הכללה).
    Generalization,
}

impl Family {
    /// All families in reporting order.
    pub fn all() -> &'static [Self] {
        &[Self::Deletion, Self::Distortion, Self::Generalization]
    }

    /// The Hebrew display name shown to learners.
    pub fn hebrew_name(&self) -> &'static str {
        match self {
            Self::Deletion => "השמטה",
            Self::Distortion => "עיוות",
            Self::Generalization => "הכללה",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deletion => write!(f, "deletion"),
            Self::Distortion => write!(f, "distortion"),
            Self::Generalization => write!(f, "generalization"),
        }
    }
}

/// A one-line client statement exhibiting or resolving the pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    /// The statement text.
    pub one_liner: String,
}

/// A clarifying question that genuinely challenges the pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoodQuestion {
    /// Stable content id, unique within the pattern's question pools.
    pub id: String,
    /// The question text.
    pub text: String,
}

/// A plausible but unhelpful question, with its authored rejection rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrapQuestion {
    /// Stable content id, unique within the pattern's question pools.
    pub id: String,
    /// The question text.
    pub text: String,
    /// Why this question does not advance the clarification.
    pub reason: String,
}

/// One entry of an authored five-option multiple-choice pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoredOption {
    /// Stable content id, unique within its pool.
    pub id: String,
    /// The option text.
    pub text: String,
    /// Whether this is the single correct entry of the pool.
    pub correct: bool,
}

/// A single linguistic-violation teaching unit.
///
/// Immutable for the lifetime of any session built from it. The structural
/// requirements (pool sizes, correct counts, id uniqueness) are enforced by
/// [`crate::validate::validate_catalog`] at load time and re-checked by the
/// engine when a round is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    /// Stable content id, unique within the catalog.
    pub id: String,
    /// The family this pattern belongs to.
    pub family: Family,
    /// Human-readable pattern name.
    pub name: String,
    /// Definition text shown as a hint in learning mode.
    pub definition: String,
    /// The problem statement the learner works on.
    pub problem: Statement,
    /// The goal statement the clarification steers toward.
    pub goal: Statement,
    /// Clarifying questions (at least 2).
    pub good_questions: Vec<GoodQuestion>,
    /// Trap questions with rejection rationales (at least 3).
    pub trap_questions: Vec<TrapQuestion>,
    /// Problem-stage options (exactly 5, exactly 1 correct).
    pub problem_options: Vec<AuthoredOption>,
    /// Goal-stage options (exactly 5, exactly 1 correct).
    pub goal_options: Vec<AuthoredOption>,
}
