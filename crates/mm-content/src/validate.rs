//! Structural validation of a loaded pattern catalog.
//!
//! Checks the invariants the engine relies on: question-pool minimums, the
//! five-options-one-correct shape of the choice pools, and id uniqueness.
//! Issues are reported as a list so the CLI `check` command can show all of
//! them at once; [`crate::PatternCatalog`] treats the first error as fatal.

use std::collections::HashSet;

use crate::catalog::PatternCatalog;
use crate::pattern::{AuthoredOption, Pattern};

/// A problem found during content validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// The pattern id where the issue was found.
    pub pattern: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.pattern, self.message)
    }
}

/// Validate every pattern in a catalog.
///
/// Returns all issues found, errors and warnings alike. An empty list means
/// the catalog satisfies every structural invariant the engine assumes.
pub fn validate_catalog(catalog: &PatternCatalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut seen_ids = HashSet::new();
    for pattern in &catalog.patterns {
        if !seen_ids.insert(pattern.id.as_str()) {
            issues.push(error(&pattern.id, "duplicate pattern id"));
        }
        validate_pattern(pattern, &mut issues);
    }

    issues
}

fn validate_pattern(pattern: &Pattern, issues: &mut Vec<ValidationIssue>) {
    let id = &pattern.id;

    if pattern.id.trim().is_empty() {
        issues.push(error(id, "empty pattern id"));
    }
    if pattern.name.trim().is_empty() {
        issues.push(error(id, "empty pattern name"));
    }
    if pattern.definition.trim().is_empty() {
        issues.push(warning(id, "empty definition — learning mode has no hint text"));
    }
    if pattern.problem.one_liner.trim().is_empty() {
        issues.push(error(id, "empty problem statement"));
    }
    if pattern.goal.one_liner.trim().is_empty() {
        issues.push(error(id, "empty goal statement"));
    }

    if pattern.good_questions.len() < 2 {
        issues.push(error(
            id,
            &format!(
                "needs at least 2 good questions, has {}",
                pattern.good_questions.len()
            ),
        ));
    }
    if pattern.trap_questions.len() < 3 {
        issues.push(error(
            id,
            &format!(
                "needs at least 3 trap questions, has {}",
                pattern.trap_questions.len()
            ),
        ));
    }
    for trap in &pattern.trap_questions {
        if trap.reason.trim().is_empty() {
            issues.push(warning(
                id,
                &format!("trap question '{}' has no rejection rationale", trap.id),
            ));
        }
    }

    let mut question_ids = HashSet::new();
    for qid in pattern
        .good_questions
        .iter()
        .map(|q| q.id.as_str())
        .chain(pattern.trap_questions.iter().map(|q| q.id.as_str()))
    {
        if !question_ids.insert(qid) {
            issues.push(error(id, &format!("duplicate question id '{qid}'")));
        }
    }

    validate_choice_pool(id, "problemOptions", &pattern.problem_options, issues);
    validate_choice_pool(id, "goalOptions", &pattern.goal_options, issues);
}

fn validate_choice_pool(
    pattern_id: &str,
    pool: &str,
    options: &[AuthoredOption],
    issues: &mut Vec<ValidationIssue>,
) {
    if options.len() != 5 {
        issues.push(error(
            pattern_id,
            &format!("{pool} must have exactly 5 entries, has {}", options.len()),
        ));
    }

    let correct = options.iter().filter(|o| o.correct).count();
    if correct != 1 {
        issues.push(error(
            pattern_id,
            &format!("{pool} must have exactly 1 correct entry, has {correct}"),
        ));
    }

    let mut ids = HashSet::new();
    for option in options {
        if !ids.insert(option.id.as_str()) {
            issues.push(error(
                pattern_id,
                &format!("{pool} has duplicate option id '{}'", option.id),
            ));
        }
    }
}

fn error(pattern: &str, message: &str) -> ValidationIssue {
    ValidationIssue {
        pattern: pattern.to_string(),
        message: message.to_string(),
        is_error: true,
    }
}

fn warning(pattern: &str, message: &str) -> ValidationIssue {
    ValidationIssue {
        pattern: pattern.to_string(),
        message: message.to_string(),
        is_error: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Family, GoodQuestion, Statement, TrapQuestion};

    fn options(prefix: &str) -> Vec<AuthoredOption> {
        (0..5)
            .map(|i| AuthoredOption {
                id: format!("{prefix}{i}"),
                text: format!("אפשרות {i}"),
                correct: i == 0,
            })
            .collect()
    }

    fn valid_pattern() -> Pattern {
        Pattern {
            id: "mind-reading".to_string(),
            family: Family::Distortion,
            name: "קריאת מחשבות".to_string(),
            definition: "ייחוס ידיעה על עולמו הפנימי של האחר.".to_string(),
            problem: Statement {
                one_liner: "היא חושבת שאני טיפש.".to_string(),
            },
            goal: Statement {
                one_liner: "לברר על סמך מה נקבעה הידיעה.".to_string(),
            },
            good_questions: vec![
                GoodQuestion {
                    id: "g1".to_string(),
                    text: "איך אתה יודע שזה מה שהיא חושבת?".to_string(),
                },
                GoodQuestion {
                    id: "g2".to_string(),
                    text: "מה ראית או שמעת שהוביל למסקנה הזו?".to_string(),
                },
            ],
            trap_questions: vec![
                TrapQuestion {
                    id: "t1".to_string(),
                    text: "למה אכפת לך ממנה?".to_string(),
                    reason: "מסיטה מהבדיקה.".to_string(),
                },
                TrapQuestion {
                    id: "t2".to_string(),
                    text: "אולי היא צודקת?".to_string(),
                    reason: "מקבעת את הפרשנות.".to_string(),
                },
                TrapQuestion {
                    id: "t3".to_string(),
                    text: "כמה זמן אתם מכירים?".to_string(),
                    reason: "לא נוגעת לקריאת המחשבות.".to_string(),
                },
            ],
            problem_options: options("p"),
            goal_options: options("o"),
        }
    }

    fn issues_for(pattern: Pattern) -> Vec<ValidationIssue> {
        // Bypass the catalog constructor, which rejects errors outright.
        let catalog = PatternCatalog {
            patterns: vec![pattern],
        };
        validate_catalog(&catalog)
    }

    #[test]
    fn valid_pattern_has_no_issues() {
        let issues = issues_for(valid_pattern());
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn too_few_good_questions() {
        let mut p = valid_pattern();
        p.good_questions.pop();
        let issues = issues_for(p);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message.contains("at least 2 good questions"))
        );
    }

    #[test]
    fn too_few_trap_questions() {
        let mut p = valid_pattern();
        p.trap_questions.truncate(2);
        let issues = issues_for(p);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message.contains("at least 3 trap questions"))
        );
    }

    #[test]
    fn wrong_option_count() {
        let mut p = valid_pattern();
        p.problem_options.pop();
        let issues = issues_for(p);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message.contains("exactly 5 entries"))
        );
    }

    #[test]
    fn wrong_correct_count() {
        let mut p = valid_pattern();
        p.goal_options[1].correct = true;
        let issues = issues_for(p);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message.contains("exactly 1 correct entry, has 2"))
        );
    }

    #[test]
    fn duplicate_option_id() {
        let mut p = valid_pattern();
        p.problem_options[4].id = p.problem_options[0].id.clone();
        let issues = issues_for(p);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message.contains("duplicate option id"))
        );
    }

    #[test]
    fn duplicate_question_id_across_pools() {
        let mut p = valid_pattern();
        p.trap_questions[0].id = "g1".to_string();
        let issues = issues_for(p);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message.contains("duplicate question id 'g1'"))
        );
    }

    #[test]
    fn missing_trap_reason_warns() {
        let mut p = valid_pattern();
        p.trap_questions[1].reason = String::new();
        let issues = issues_for(p);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error);
        assert!(issues[0].message.contains("no rejection rationale"));
    }

    #[test]
    fn empty_statement_errors() {
        let mut p = valid_pattern();
        p.problem.one_liner = "  ".to_string();
        let issues = issues_for(p);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message.contains("empty problem statement"))
        );
    }

    #[test]
    fn issue_display_includes_level() {
        let issue = super::error("x", "boom");
        assert_eq!(issue.to_string(), "error: x: boom");
        let issue = super::warning("x", "meh");
        assert_eq!(issue.to_string(), "warning: x: meh");
    }
}
