//! Read-only snapshots of engine state for the presentation layer.
//!
//! Snapshots are owned deep copies with serde derives. Handing one out can
//! never alias engine-owned state, so a frontend may keep, serialize, or
//! rework it freely between engine calls.

use std::collections::BTreeMap;

use mm_content::Family;
use serde::{Deserialize, Serialize};

use crate::config::{Lives, Mode};
use crate::rng::Seed;
use crate::round::{Round, RoundOption, RoundStatus, Stage, StageRecord};
use crate::session::{EndReason, Session, StatCounter};

/// Deep copy of one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Id of the pattern the round drills.
    pub pattern_id: String,
    /// Family of that pattern.
    pub family: Family,
    /// Current state-machine position.
    pub stage: Stage,
    /// Active/failed status.
    pub status: RoundStatus,
    /// Question-stage option set.
    pub question_options: Vec<RoundOption>,
    /// Problem-stage option set.
    pub problem_options: Vec<RoundOption>,
    /// Goal-stage option set.
    pub goal_options: Vec<RoundOption>,
    /// Question-stage attempt record.
    pub question_record: StageRecord,
    /// Problem-stage attempt record.
    pub problem_record: StageRecord,
    /// Goal-stage attempt record.
    pub goal_record: StageRecord,
}

/// Deep copy of the whole session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Play mode.
    pub mode: Mode,
    /// The session seed.
    pub seed: Seed,
    /// Running score.
    pub score: u32,
    /// Current streak.
    pub streak: u32,
    /// Total answers submitted.
    pub attempts: u32,
    /// Correct answers.
    pub correct: u32,
    /// Wrong answers.
    pub wrong: u32,
    /// Rounds completed.
    pub completed_rounds: u32,
    /// Seconds left on the countdown.
    pub time_left_seconds: u32,
    /// Remaining lives budget.
    pub lives_left: Lives,
    /// Whether the clock is paused.
    pub paused: bool,
    /// Whether the session has ended.
    pub ended: bool,
    /// Why it ended, once it has.
    pub end_reason: Option<EndReason>,
    /// Index of the current round in `rounds`.
    pub current_round: usize,
    /// All rounds, oldest first.
    pub rounds: Vec<RoundSnapshot>,
    /// Per-pattern tallies.
    pub pattern_stats: BTreeMap<String, StatCounter>,
    /// Per-family tallies.
    pub family_stats: BTreeMap<Family, StatCounter>,
}

impl Round {
    /// Deep-copy this round for external consumption.
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            pattern_id: self.pattern_id.clone(),
            family: self.family,
            stage: self.stage,
            status: self.status,
            question_options: self.question_options.clone(),
            problem_options: self.problem_options.clone(),
            goal_options: self.goal_options.clone(),
            question_record: self.question_record.clone(),
            problem_record: self.problem_record.clone(),
            goal_record: self.goal_record.clone(),
        }
    }
}

impl Session {
    /// Deep-copy the session state for external consumption.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            seed: self.seed.clone(),
            score: self.score,
            streak: self.streak,
            attempts: self.attempts_total,
            correct: self.correct_total,
            wrong: self.wrong_total,
            completed_rounds: self.completed_rounds,
            time_left_seconds: self.time_left,
            lives_left: self.lives,
            paused: self.paused,
            ended: self.ended,
            end_reason: self.end_reason,
            current_round: self.current,
            rounds: self.rounds.iter().map(Round::snapshot).collect(),
            pattern_stats: self.pattern_stats.clone(),
            family_stats: self.family_stats.clone(),
        }
    }
}
