//! Rounds: one pass through a single pattern's three answerable stages.
//!
//! A round is built from a pattern by sampling and shuffling its option
//! pools. Construction validates every generated set and fails loudly on
//! malformed content — a broken set here means corrupt content upstream,
//! never a recoverable play condition.

use mm_content::{AuthoredOption, Family, Pattern};
use serde::{Deserialize, Serialize};

use crate::config::OptionCounts;
use crate::error::{EngineError, EngineResult};
use crate::rng::SeededRng;

/// A round's position in its state machine. Moves strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Pick the clarifying questions that challenge the pattern.
    Question,
    /// Identify the problem statement.
    Problem,
    /// Identify the goal statement.
    Goal,
    /// Terminal: the round is over.
    Summary,
}

/// All stages in state-machine order.
pub const STAGES: [Stage; 4] = [Stage::Question, Stage::Problem, Stage::Goal, Stage::Summary];

impl Stage {
    /// The following stage, or `None` from `summary`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Question => Some(Self::Problem),
            Self::Problem => Some(Self::Goal),
            Self::Goal => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    /// True for the terminal `summary` stage.
    pub fn is_terminal(self) -> bool {
        self == Self::Summary
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Question => write!(f, "question"),
            Self::Problem => write!(f, "problem"),
            Self::Goal => write!(f, "goal"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Whether the round is still being played or was force-failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// The round is live (or completed normally).
    Active,
    /// An exam wrong answer ended the round early.
    Failed,
}

/// Which pool a generated option came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionOrigin {
    /// A good (clarifying) question.
    Good,
    /// A trap question.
    Trap,
    /// An authored problem/goal choice.
    Authored,
}

/// One entry of a generated, shuffled stage option set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundOption {
    /// Content id, unique within the set.
    pub id: String,
    /// Display text.
    pub text: String,
    /// Whether choosing this option is correct.
    pub is_correct: bool,
    /// Authored rejection rationale (trap questions only).
    pub rationale: Option<String>,
    /// Provenance of the option.
    pub origin: OptionOrigin,
}

/// Per-stage attempt bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageRecord {
    /// Total answers submitted at this stage.
    pub attempts: u32,
    /// Wrong answers at this stage.
    pub failures: u32,
    /// Chosen option ids, in submission order.
    pub chosen: Vec<String>,
}

/// One full pass through a single pattern's stages.
#[derive(Debug, Clone)]
pub struct Round {
    pub(crate) pattern_index: usize,
    pub(crate) pattern_id: String,
    pub(crate) family: Family,
    pub(crate) stage: Stage,
    pub(crate) status: RoundStatus,
    pub(crate) question_options: Vec<RoundOption>,
    pub(crate) problem_options: Vec<RoundOption>,
    pub(crate) goal_options: Vec<RoundOption>,
    pub(crate) question_record: StageRecord,
    pub(crate) problem_record: StageRecord,
    pub(crate) goal_record: StageRecord,
}

impl Round {
    /// Index of the round's pattern in the session pool.
    pub fn pattern_index(&self) -> usize {
        self.pattern_index
    }

    /// Id of the pattern this round drills.
    pub fn pattern_id(&self) -> &str {
        &self.pattern_id
    }

    /// Family of the pattern this round drills.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Current state-machine position.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Active/failed status.
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// The option set for an answerable stage (`None` for `summary`).
    pub fn options_for(&self, stage: Stage) -> Option<&[RoundOption]> {
        match stage {
            Stage::Question => Some(&self.question_options),
            Stage::Problem => Some(&self.problem_options),
            Stage::Goal => Some(&self.goal_options),
            Stage::Summary => None,
        }
    }

    /// The option set for the current stage (`None` once in `summary`).
    pub fn current_options(&self) -> Option<&[RoundOption]> {
        self.options_for(self.stage)
    }

    /// The attempt record for an answerable stage.
    pub fn record_for(&self, stage: Stage) -> Option<&StageRecord> {
        match stage {
            Stage::Question => Some(&self.question_record),
            Stage::Problem => Some(&self.problem_record),
            Stage::Goal => Some(&self.goal_record),
            Stage::Summary => None,
        }
    }

    pub(crate) fn record_mut(&mut self, stage: Stage) -> Option<&mut StageRecord> {
        match stage {
            Stage::Question => Some(&mut self.question_record),
            Stage::Problem => Some(&mut self.problem_record),
            Stage::Goal => Some(&mut self.goal_record),
            Stage::Summary => None,
        }
    }
}

/// Build a round from a pattern: generate, shuffle, and validate all three
/// stage option sets.
pub fn build_round(
    pattern: &Pattern,
    pattern_index: usize,
    counts: &OptionCounts,
    rng: &mut SeededRng,
) -> EngineResult<Round> {
    let question_options = generate_question_options(pattern, counts, rng)?;
    let problem_options = generate_problem_options(pattern, counts, rng)?;
    let goal_options = generate_goal_options(pattern, counts, rng)?;

    Ok(Round {
        pattern_index,
        pattern_id: pattern.id.clone(),
        family: pattern.family,
        stage: Stage::Question,
        status: RoundStatus::Active,
        question_options,
        problem_options,
        goal_options,
        question_record: StageRecord::default(),
        problem_record: StageRecord::default(),
        goal_record: StageRecord::default(),
    })
}

/// Generate the question-stage set: sample good and trap questions without
/// replacement, tag them, and shuffle the combined set.
pub fn generate_question_options(
    pattern: &Pattern,
    counts: &OptionCounts,
    rng: &mut SeededRng,
) -> EngineResult<Vec<RoundOption>> {
    let trap_count = counts.question_options.saturating_sub(counts.question_correct);

    let good = rng.sample_unique(&pattern.good_questions, counts.question_correct);
    let traps = rng.sample_unique(&pattern.trap_questions, trap_count);

    let mut combined: Vec<RoundOption> = Vec::with_capacity(counts.question_options);
    combined.extend(good.into_iter().map(|q| RoundOption {
        id: q.id,
        text: q.text,
        is_correct: true,
        rationale: None,
        origin: OptionOrigin::Good,
    }));
    combined.extend(traps.into_iter().map(|q| RoundOption {
        id: q.id,
        text: q.text,
        is_correct: false,
        rationale: Some(q.reason),
        origin: OptionOrigin::Trap,
    }));

    let shuffled = rng.shuffle(&combined);
    check_option_set(
        &shuffled,
        counts.question_options,
        counts.question_correct,
        &pattern.id,
        Stage::Question,
    )?;
    Ok(shuffled)
}

/// Generate the problem-stage set from the authored pool.
pub fn generate_problem_options(
    pattern: &Pattern,
    counts: &OptionCounts,
    rng: &mut SeededRng,
) -> EngineResult<Vec<RoundOption>> {
    authored_stage_options(&pattern.problem_options, &pattern.id, Stage::Problem, counts, rng)
}

/// Generate the goal-stage set from the authored pool.
pub fn generate_goal_options(
    pattern: &Pattern,
    counts: &OptionCounts,
    rng: &mut SeededRng,
) -> EngineResult<Vec<RoundOption>> {
    authored_stage_options(&pattern.goal_options, &pattern.id, Stage::Goal, counts, rng)
}

fn authored_stage_options(
    authored: &[AuthoredOption],
    pattern_id: &str,
    stage: Stage,
    counts: &OptionCounts,
    rng: &mut SeededRng,
) -> EngineResult<Vec<RoundOption>> {
    let normalized: Vec<RoundOption> = authored
        .iter()
        .map(|o| RoundOption {
            id: o.id.clone(),
            text: o.text.clone(),
            is_correct: o.correct,
            rationale: None,
            origin: OptionOrigin::Authored,
        })
        .collect();

    check_option_set(&normalized, counts.choice_options, 1, pattern_id, stage)?;
    Ok(rng.shuffle(&normalized))
}

/// Validate a generated set: exact size, exact correct count, unique ids.
fn check_option_set(
    options: &[RoundOption],
    expected_len: usize,
    expected_correct: usize,
    pattern_id: &str,
    stage: Stage,
) -> EngineResult<()> {
    let fail = |message: String| EngineError::InvalidOptionSet {
        pattern: pattern_id.to_string(),
        stage,
        message,
    };

    if options.len() != expected_len {
        return Err(fail(format!(
            "expected {expected_len} options, got {}",
            options.len()
        )));
    }

    let correct = options.iter().filter(|o| o.is_correct).count();
    if correct != expected_correct {
        return Err(fail(format!(
            "expected {expected_correct} correct options, got {correct}"
        )));
    }

    let mut ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != options.len() {
        return Err(fail("duplicate option ids".to_string()));
    }

    Ok(())
}
