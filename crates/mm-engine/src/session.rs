//! Session management: the aggregate root of a play-through.
//!
//! A [`Session`] owns its pattern pool, RNG, configuration snapshot, and the
//! history of rounds played so far. It is mutated exclusively through the
//! methods here; every operation is synchronous and touches nothing outside
//! the session object. The presentation layer drives it one call at a time
//! and re-renders from the returned values.

use std::collections::BTreeMap;

use mm_content::{Family, Pattern, PatternCatalog};
use serde::{Deserialize, Serialize};

use crate::config::{Lives, Mode, PatternStrategy, TrainerConfig};
use crate::error::{EngineError, EngineResult};
use crate::report::{SessionReport, build_report};
use crate::rng::{Seed, SeededRng};
use crate::round::{Round, RoundOption, RoundStatus, Stage, build_round};

/// Shown when a trap question carries no authored rationale.
const TRAP_FALLBACK: &str =
    "שאלה מכשילה: היא אינה מקדמת את הבירור. חפשו שאלה שמכוונת אל המידע החסר.";
/// Shown on the first wrong problem/goal answer.
const WRONG_CHOICE_NUDGE: &str = "לא מדויק. קראו שוב את ההיגד ונסו שוב.";
/// Prefix for the correct-answer reveal on repeated failures.
const REVEAL_PREFIX: &str = "התשובה הנכונה היא: ";

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// The countdown reached zero.
    Time,
    /// The lives budget ran out (exam mode).
    Lives,
    /// The player or presentation layer ended it.
    Manual,
}

/// Attempt/correct/wrong tallies for one pattern or family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCounter {
    /// Total stage answers recorded.
    pub attempts: u32,
    /// Correct answers.
    pub correct: u32,
    /// Wrong answers.
    pub wrong: u32,
}

/// What the engine reports back for one submitted answer.
///
/// The two variants deliberately carry different fields — the presentation
/// layer branches on which one it received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnswerFeedback {
    /// The answer was correct and the round advanced.
    Correct {
        /// The stage that was answered.
        stage: Stage,
        /// The stage the round is now in.
        next_stage: Stage,
        /// True when the answer completed the round.
        completed_round: bool,
        /// Session score after this answer.
        score: u32,
        /// Current streak after this answer.
        streak: u32,
    },
    /// The answer was wrong.
    Incorrect {
        /// The stage that was answered.
        stage: Stage,
        /// The stage the round is now in (`summary` if force-ended).
        next_stage: Stage,
        /// Whether the same stage can be answered again.
        retry_allowed: bool,
        /// Learning-mode explanation; absent in exam mode.
        explanation: Option<String>,
        /// Remaining lives, when the budget is finite.
        lives_left: Option<u32>,
        /// True when this answer force-ended the round.
        round_ended: bool,
    },
}

impl AnswerFeedback {
    /// True for the `Correct` variant.
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }
}

/// Everything needed to start a session.
#[derive(Debug, Clone)]
pub struct SessionInput {
    /// The content to drill.
    pub catalog: PatternCatalog,
    /// Play mode.
    pub mode: Mode,
    /// RNG seed.
    pub seed: Seed,
    /// Configuration profile.
    pub config: TrainerConfig,
    /// Optional allow-list restricting which patterns are drawn.
    pub enabled_patterns: Option<Vec<String>>,
}

impl SessionInput {
    /// Input with the default mode (learning), seed, and configuration.
    pub fn new(catalog: PatternCatalog) -> Self {
        Self {
            catalog,
            mode: Mode::Learning,
            seed: Seed::Number(42),
            config: TrainerConfig::default(),
            enabled_patterns: None,
        }
    }

    /// Set the play mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Set the configuration profile.
    pub fn with_config(mut self, config: TrainerConfig) -> Self {
        self.config = config;
        self
    }

    /// Restrict the session to the given pattern ids.
    pub fn with_enabled_patterns(mut self, ids: Vec<String>) -> Self {
        self.enabled_patterns = Some(ids);
        self
    }
}

/// One continuous play-through: a sequence of rounds bounded by a time
/// budget and, in exam mode, a lives budget.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) mode: Mode,
    pub(crate) seed: Seed,
    pub(crate) rng: SeededRng,
    pub(crate) config: TrainerConfig,
    pub(crate) patterns: Vec<Pattern>,
    pub(crate) rounds: Vec<Round>,
    pub(crate) current: usize,
    pub(crate) score: u32,
    pub(crate) streak: u32,
    pub(crate) attempts_total: u32,
    pub(crate) correct_total: u32,
    pub(crate) wrong_total: u32,
    pub(crate) completed_rounds: u32,
    pub(crate) pattern_stats: BTreeMap<String, StatCounter>,
    pub(crate) family_stats: BTreeMap<Family, StatCounter>,
    pub(crate) time_left: u32,
    pub(crate) lives: Lives,
    pub(crate) paused: bool,
    pub(crate) ended: bool,
    pub(crate) end_reason: Option<EndReason>,
    pub(crate) last_pattern_index: Option<usize>,
}

impl Session {
    /// Start a session: resolve the pattern pool, seed the RNG, apply the
    /// mode profile, and eagerly build the first round.
    pub fn new(input: SessionInput) -> EngineResult<Self> {
        let SessionInput {
            catalog,
            mode,
            seed,
            config,
            enabled_patterns,
        } = input;

        let patterns: Vec<Pattern> = match &enabled_patterns {
            Some(ids) => catalog
                .patterns
                .into_iter()
                .filter(|p| ids.iter().any(|id| *id == p.id))
                .collect(),
            None => catalog.patterns,
        };
        if patterns.is_empty() {
            return Err(EngineError::EmptyPatternPool);
        }

        let mode_cfg = *config.mode(mode);
        let rng = SeededRng::from_seed(&seed);

        let mut session = Self {
            mode,
            seed,
            rng,
            config,
            patterns,
            rounds: Vec::new(),
            current: 0,
            score: 0,
            streak: 0,
            attempts_total: 0,
            correct_total: 0,
            wrong_total: 0,
            completed_rounds: 0,
            pattern_stats: BTreeMap::new(),
            family_stats: BTreeMap::new(),
            time_left: mode_cfg.session_seconds,
            lives: mode_cfg.lives,
            paused: false,
            ended: false,
            end_reason: None,
            last_pattern_index: None,
        };
        session.next_round()?;
        Ok(session)
    }

    /// Submit an answer for the current stage.
    ///
    /// Records the attempt (round, session, pattern, and family tallies)
    /// before branching on correctness, then applies the mode-specific
    /// consequences and returns the feedback the presentation layer renders.
    pub fn submit_answer(&mut self, option_id: &str) -> EngineResult<AnswerFeedback> {
        if self.ended {
            return Err(EngineError::SessionEnded);
        }
        let current = self.current;
        let stage = self.rounds[current].stage;
        if stage.is_terminal() {
            return Err(EngineError::RoundComplete);
        }

        let chosen = self.rounds[current]
            .current_options()
            .and_then(|opts| opts.iter().find(|o| o.id == option_id))
            .cloned()
            .ok_or_else(|| EngineError::UnknownOption(option_id.to_string()))?;

        let pattern_id = self.rounds[current].pattern_id.clone();
        let family = self.rounds[current].family;

        if let Some(record) = self.rounds[current].record_mut(stage) {
            record.attempts += 1;
            record.chosen.push(chosen.id.clone());
        }
        self.attempts_total += 1;
        self.pattern_stats.entry(pattern_id.clone()).or_default().attempts += 1;
        self.family_stats.entry(family).or_default().attempts += 1;

        if chosen.is_correct {
            self.apply_correct(current, stage, &pattern_id, family)
        } else {
            self.apply_wrong(current, stage, &chosen, &pattern_id, family)
        }
    }

    fn apply_correct(
        &mut self,
        current: usize,
        stage: Stage,
        pattern_id: &str,
        family: Family,
    ) -> EngineResult<AnswerFeedback> {
        self.correct_total += 1;
        self.streak += 1;
        if let Some(stats) = self.pattern_stats.get_mut(pattern_id) {
            stats.correct += 1;
        }
        if let Some(stats) = self.family_stats.get_mut(&family) {
            stats.correct += 1;
        }

        let scoring = self.config.scoring;
        self.score += scoring.correct_stage_base + (self.streak - 1) * scoring.streak_bonus_step;

        let Some(next_stage) = stage.next() else {
            return Err(EngineError::RoundComplete);
        };
        self.rounds[current].stage = next_stage;

        let completed_round = next_stage.is_terminal();
        if completed_round {
            self.completed_rounds += 1;
            if self.mode == Mode::Exam && scoring.exam_time_bonus_divisor > 0 {
                self.score += self.time_left / scoring.exam_time_bonus_divisor;
            }
        }

        Ok(AnswerFeedback::Correct {
            stage,
            next_stage,
            completed_round,
            score: self.score,
            streak: self.streak,
        })
    }

    fn apply_wrong(
        &mut self,
        current: usize,
        stage: Stage,
        chosen: &RoundOption,
        pattern_id: &str,
        family: Family,
    ) -> EngineResult<AnswerFeedback> {
        self.wrong_total += 1;
        self.streak = 0;
        if let Some(stats) = self.pattern_stats.get_mut(pattern_id) {
            stats.wrong += 1;
        }
        if let Some(stats) = self.family_stats.get_mut(&family) {
            stats.wrong += 1;
        }
        let failures = match self.rounds[current].record_mut(stage) {
            Some(record) => {
                record.failures += 1;
                record.failures
            }
            None => 0,
        };

        match self.mode {
            Mode::Learning => {
                let penalty = self.config.learning.time_penalty_on_wrong;
                self.time_left = self.time_left.saturating_sub(penalty);
                let explanation = self.learning_explanation(current, stage, chosen, failures);
                Ok(AnswerFeedback::Incorrect {
                    stage,
                    next_stage: stage,
                    retry_allowed: true,
                    explanation: Some(explanation),
                    lives_left: None,
                    round_ended: false,
                })
            }
            Mode::Exam => {
                self.lives.lose_one();
                let mut round_ended = false;
                if self.config.session.exam_ends_round_on_wrong {
                    let round = &mut self.rounds[current];
                    round.status = RoundStatus::Failed;
                    round.stage = Stage::Summary;
                    round_ended = true;
                }
                if self.lives.is_out() {
                    self.finish(EndReason::Lives);
                }
                Ok(AnswerFeedback::Incorrect {
                    stage,
                    next_stage: self.rounds[current].stage,
                    retry_allowed: !self.ended && !round_ended,
                    explanation: None,
                    lives_left: self.lives.remaining(),
                    round_ended,
                })
            }
        }
    }

    /// Learning-mode explanation text for a wrong answer.
    fn learning_explanation(
        &self,
        current: usize,
        stage: Stage,
        chosen: &RoundOption,
        failures: u32,
    ) -> String {
        match stage {
            Stage::Question => chosen
                .rationale
                .clone()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| TRAP_FALLBACK.to_string()),
            Stage::Problem | Stage::Goal => {
                // From the second failure on, reveal the correct answer.
                if failures >= 2 {
                    let correct_text = self.rounds[current]
                        .options_for(stage)
                        .and_then(|opts| opts.iter().find(|o| o.is_correct))
                        .map(|o| o.text.as_str())
                        .unwrap_or_default();
                    format!("{REVEAL_PREFIX}«{correct_text}»")
                } else {
                    WRONG_CHOICE_NUDGE.to_string()
                }
            }
            Stage::Summary => String::new(),
        }
    }

    /// Start the next round. Fails while the current round is unfinished.
    pub fn next_round(&mut self) -> EngineResult<&Round> {
        if self.ended {
            return Err(EngineError::SessionEnded);
        }
        if let Some(round) = self.rounds.last()
            && !round.stage.is_terminal()
        {
            return Err(EngineError::RoundInProgress(round.stage));
        }

        let index = self.pick_next_pattern()?;
        let round = build_round(
            &self.patterns[index],
            index,
            &self.config.option_counts,
            &mut self.rng,
        )?;
        self.rounds.push(round);
        self.current = self.rounds.len() - 1;
        self.last_pattern_index = Some(index);
        Ok(&self.rounds[self.current])
    }

    fn pick_next_pattern(&mut self) -> EngineResult<usize> {
        if self.patterns.is_empty() {
            return Err(EngineError::EmptyPatternPool);
        }
        match self.config.session.pattern_strategy {
            PatternStrategy::Sequential => Ok(match self.last_pattern_index {
                Some(last) => (last + 1) % self.patterns.len(),
                None => 0,
            }),
            PatternStrategy::Random => {
                let drawn = self.rng.next_int(0, self.patterns.len() as u32)?;
                Ok(drawn as usize)
            }
        }
    }

    /// Advance the countdown. Ends the session with reason `time` when the
    /// budget is exhausted.
    pub fn tick(&mut self, seconds: u32) -> EngineResult<u32> {
        if self.ended {
            return Err(EngineError::SessionEnded);
        }
        self.time_left = self.time_left.saturating_sub(seconds);
        if self.time_left == 0 {
            self.finish(EndReason::Time);
        }
        Ok(self.time_left)
    }

    /// End the session and return the final report.
    ///
    /// Idempotent: an already-ended session keeps its original end reason.
    /// With no reason given, the reason is `manual`.
    pub fn end(&mut self, reason: Option<EndReason>) -> SessionReport {
        if !self.ended {
            self.ended = true;
            self.end_reason = Some(reason.unwrap_or(EndReason::Manual));
        }
        build_report(self)
    }

    fn finish(&mut self, reason: EndReason) {
        self.ended = true;
        self.end_reason = Some(reason);
    }

    /// Pause the clock bookkeeping. Fails when the mode forbids pausing.
    pub fn pause(&mut self) -> EngineResult<()> {
        if self.ended {
            return Err(EngineError::SessionEnded);
        }
        if !self.config.mode(self.mode).allow_pause {
            return Err(EngineError::PauseNotAllowed);
        }
        self.paused = true;
        Ok(())
    }

    /// Resume after a pause.
    pub fn resume(&mut self) -> EngineResult<()> {
        if self.ended {
            return Err(EngineError::SessionEnded);
        }
        self.paused = false;
        Ok(())
    }

    /// Derive the end-of-session report without mutating anything.
    pub fn report(&self) -> SessionReport {
        build_report(self)
    }

    /// The round currently being played (or just finished).
    pub fn current_round(&self) -> &Round {
        &self.rounds[self.current]
    }

    /// All rounds, oldest first.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Play mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The seed this session was created with.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// The configuration snapshot.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// The enabled pattern pool.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Running score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current consecutive-correct streak.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Total answers submitted.
    pub fn attempts(&self) -> u32 {
        self.attempts_total
    }

    /// Total correct answers.
    pub fn correct(&self) -> u32 {
        self.correct_total
    }

    /// Total wrong answers.
    pub fn wrong(&self) -> u32 {
        self.wrong_total
    }

    /// Rounds completed (all three stages answered correctly).
    pub fn completed_rounds(&self) -> u32 {
        self.completed_rounds
    }

    /// Seconds left on the countdown.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Remaining lives budget.
    pub fn lives(&self) -> Lives {
        self.lives
    }

    /// Whether the clock is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the session has ended.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Why the session ended, once it has.
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Per-pattern tallies, keyed by pattern id. Entries exist only for
    /// patterns that have been attempted.
    pub fn pattern_stats(&self) -> &BTreeMap<String, StatCounter> {
        &self.pattern_stats
    }

    /// Per-family tallies. Entries exist only for attempted families.
    pub fn family_stats(&self) -> &BTreeMap<Family, StatCounter> {
        &self.family_stats
    }
}
