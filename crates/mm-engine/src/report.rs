//! End-of-session reporting: derived statistics, no mutation.

use mm_content::Family;
use serde::{Deserialize, Serialize};

use crate::config::Mode;
use crate::session::{EndReason, Session};

/// Aggregate results for one family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyReport {
    /// The family.
    pub family: Family,
    /// Answers recorded for this family.
    pub attempts: u32,
    /// Correct answers.
    pub correct: u32,
    /// Wrong answers.
    pub wrong: u32,
    /// Rounded percentage of correct answers (0 with no attempts).
    pub accuracy: u32,
}

/// One entry of the weak-pattern ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeakPattern {
    /// The pattern id.
    pub pattern_id: String,
    /// Answers recorded for this pattern.
    pub attempts: u32,
    /// Correct answers.
    pub correct: u32,
    /// Wrong answers.
    pub wrong: u32,
    /// Rounded percentage of correct answers.
    pub accuracy: u32,
}

/// The end-of-session report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// The mode the session was played in.
    pub mode: Mode,
    /// Why the session ended (`None` while still running).
    pub end_reason: Option<EndReason>,
    /// Final score.
    pub score: u32,
    /// Rounds completed.
    pub completed_rounds: u32,
    /// Total answers submitted.
    pub attempts: u32,
    /// Correct answers.
    pub correct: u32,
    /// Wrong answers.
    pub wrong: u32,
    /// Overall accuracy percentage.
    pub accuracy: u32,
    /// Seconds left on the countdown when the report was built.
    pub time_left_seconds: u32,
    /// Per-family breakdown, sorted by family name.
    pub families: Vec<FamilyReport>,
    /// Up to 5 weakest patterns: accuracy ascending, then wrong-count
    /// descending, then id. Patterns never attempted do not appear.
    pub weak_patterns: Vec<WeakPattern>,
}

/// Rounded percent of correct answers; 0 when nothing was attempted.
fn accuracy_percent(correct: u32, wrong: u32) -> u32 {
    let total = correct + wrong;
    if total == 0 {
        return 0;
    }
    ((f64::from(correct) / f64::from(total)) * 100.0).round() as u32
}

/// Derive the report from a session without mutating it.
pub fn build_report(session: &Session) -> SessionReport {
    let families = session
        .family_stats
        .iter()
        .map(|(family, stats)| FamilyReport {
            family: *family,
            attempts: stats.attempts,
            correct: stats.correct,
            wrong: stats.wrong,
            accuracy: accuracy_percent(stats.correct, stats.wrong),
        })
        .collect();

    let mut weak_patterns: Vec<WeakPattern> = session
        .pattern_stats
        .iter()
        .map(|(id, stats)| WeakPattern {
            pattern_id: id.clone(),
            attempts: stats.attempts,
            correct: stats.correct,
            wrong: stats.wrong,
            accuracy: accuracy_percent(stats.correct, stats.wrong),
        })
        .collect();
    weak_patterns.sort_by(|a, b| {
        a.accuracy
            .cmp(&b.accuracy)
            .then(b.wrong.cmp(&a.wrong))
            .then(a.pattern_id.cmp(&b.pattern_id))
    });
    weak_patterns.truncate(5);

    SessionReport {
        mode: session.mode,
        end_reason: session.end_reason,
        score: session.score,
        completed_rounds: session.completed_rounds,
        attempts: session.attempts_total,
        correct: session.correct_total,
        wrong: session.wrong_total,
        accuracy: accuracy_percent(session.correct_total, session.wrong_total),
        time_left_seconds: session.time_left,
        families,
        weak_patterns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionInput, StatCounter};
    use crate::testutil::catalog_of;

    fn session() -> Session {
        Session::new(SessionInput::new(catalog_of(3)).with_seed("report")).unwrap()
    }

    fn answer(session: &mut Session, correct: bool) {
        let id = session
            .current_round()
            .current_options()
            .unwrap()
            .iter()
            .find(|o| o.is_correct == correct)
            .unwrap()
            .id
            .clone();
        session.submit_answer(&id).unwrap();
    }

    #[test]
    fn empty_session_reports_zeroes() {
        let report = session().report();
        assert_eq!(report.attempts, 0);
        assert_eq!(report.accuracy, 0);
        assert!(report.families.is_empty());
        assert!(report.weak_patterns.is_empty());
        assert!(report.end_reason.is_none());
    }

    #[test]
    fn accuracy_is_rounded() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(2, 1), 67);
        assert_eq!(accuracy_percent(1, 2), 33);
        assert_eq!(accuracy_percent(1, 0), 100);
        assert_eq!(accuracy_percent(0, 3), 0);
    }

    #[test]
    fn report_reflects_play() {
        let mut s = session();
        answer(&mut s, false);
        answer(&mut s, true);
        answer(&mut s, true);
        answer(&mut s, true);
        let report = s.report();
        assert_eq!(report.attempts, 4);
        assert_eq!(report.correct, 3);
        assert_eq!(report.wrong, 1);
        assert_eq!(report.accuracy, 75);
        assert_eq!(report.completed_rounds, 1);
        assert_eq!(report.families.len(), 1);
        assert_eq!(report.weak_patterns.len(), 1);
        assert_eq!(report.weak_patterns[0].accuracy, 75);
    }

    #[test]
    fn weak_patterns_rank_worst_first_with_tie_breaks() {
        let mut s = session();
        s.pattern_stats.clear();
        for (id, attempts, correct, wrong) in [
            ("a", 4, 1, 3), // 25%
            ("b", 4, 1, 3), // 25%, same wrong as a — id breaks the tie
            ("c", 2, 1, 1), // 50%
            ("d", 4, 0, 4), // 0%
            ("e", 8, 2, 6), // 25%, more wrong than a/b
            ("f", 1, 0, 1), // 0%, fewer wrong than d
        ] {
            s.pattern_stats.insert(
                id.to_string(),
                StatCounter {
                    attempts,
                    correct,
                    wrong,
                },
            );
        }
        let report = s.report();
        let order: Vec<&str> = report
            .weak_patterns
            .iter()
            .map(|w| w.pattern_id.as_str())
            .collect();
        assert_eq!(order, vec!["d", "f", "e", "a", "b"]);
        assert_eq!(report.weak_patterns.len(), 5, "capped at five");
    }

    #[test]
    fn families_are_sorted_by_name() {
        let mut s = session();
        s.family_stats.clear();
        for family in [Family::Generalization, Family::Deletion, Family::Distortion] {
            s.family_stats.insert(
                family,
                StatCounter {
                    attempts: 1,
                    correct: 1,
                    wrong: 0,
                },
            );
        }
        let report = s.report();
        let order: Vec<Family> = report.families.iter().map(|f| f.family).collect();
        assert_eq!(
            order,
            vec![Family::Deletion, Family::Distortion, Family::Generalization]
        );
    }

    #[test]
    fn report_does_not_mutate_the_session() {
        let mut s = session();
        answer(&mut s, true);
        let before = s.attempts();
        let _ = s.report();
        let _ = s.report();
        assert_eq!(s.attempts(), before);
        assert!(!s.is_ended());
    }
}
