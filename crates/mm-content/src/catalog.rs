//! The pattern catalog: an owning collection of patterns with lookups.

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};
use crate::pattern::{Family, Pattern};
use crate::validate::validate_catalog;

/// The complete content set a trainer session draws from.
///
/// Deserialized from the JSON content format (a top-level `patterns` array).
/// [`PatternCatalog::from_json_str`] rejects catalogs with duplicate ids or
/// structural errors, so downstream code can treat a loaded catalog as
/// trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternCatalog {
    /// The patterns, in authored order.
    pub patterns: Vec<Pattern>,
}

impl PatternCatalog {
    /// Build a catalog from already-constructed patterns.
    ///
    /// Fails on duplicate ids or structural errors, same as loading from
    /// JSON.
    pub fn new(patterns: Vec<Pattern>) -> ContentResult<Self> {
        let catalog = Self { patterns };
        catalog.check()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> ContentResult<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Number of patterns in the catalog.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the catalog holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Look up a pattern by id.
    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Look up a pattern by id, failing if absent.
    pub fn require(&self, id: &str) -> ContentResult<&Pattern> {
        self.get(id)
            .ok_or_else(|| ContentError::PatternNotFound(id.to_string()))
    }

    /// Iterate over patterns of one family, in authored order.
    pub fn by_family(&self, family: Family) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter().filter(move |p| p.family == family)
    }

    /// Run the strict structural checks: duplicate ids across the catalog,
    /// then every per-pattern error reported by the validator.
    fn check(&self) -> ContentResult<()> {
        let mut seen = std::collections::HashSet::new();
        for p in &self.patterns {
            if !seen.insert(p.id.as_str()) {
                return Err(ContentError::DuplicatePattern(p.id.clone()));
            }
        }
        if let Some(issue) = validate_catalog(self).into_iter().find(|i| i.is_error) {
            return Err(ContentError::Validation(issue.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{AuthoredOption, GoodQuestion, Statement, TrapQuestion};

    fn options(prefix: &str, correct_index: usize) -> Vec<AuthoredOption> {
        (0..5)
            .map(|i| AuthoredOption {
                id: format!("{prefix}{i}"),
                text: format!("אפשרות {i}"),
                correct: i == correct_index,
            })
            .collect()
    }

    fn pattern(id: &str, family: Family) -> Pattern {
        Pattern {
            id: id.to_string(),
            family,
            name: format!("דפוס {id}"),
            definition: "הגדרה.".to_string(),
            problem: Statement {
                one_liner: "אף אחד לא מקשיב לי.".to_string(),
            },
            goal: Statement {
                one_liner: "לאתר מקרה נגדי.".to_string(),
            },
            good_questions: vec![
                GoodQuestion {
                    id: "g1".to_string(),
                    text: "אף אחד? אף פעם?".to_string(),
                },
                GoodQuestion {
                    id: "g2".to_string(),
                    text: "מי בדיוק לא הקשיב, ומתי?".to_string(),
                },
            ],
            trap_questions: vec![
                TrapQuestion {
                    id: "t1".to_string(),
                    text: "למה אתה חושב ככה?".to_string(),
                    reason: "מזמינה הסבר במקום דוגמה.".to_string(),
                },
                TrapQuestion {
                    id: "t2".to_string(),
                    text: "אולי פשוט תדבר חזק יותר?".to_string(),
                    reason: "עצה, לא שאלה מבררת.".to_string(),
                },
                TrapQuestion {
                    id: "t3".to_string(),
                    text: "ממתי זה ככה?".to_string(),
                    reason: "עוקפת את ההכללה.".to_string(),
                },
            ],
            problem_options: options("p", 2),
            goal_options: options("o", 0),
        }
    }

    #[test]
    fn new_accepts_valid_patterns() {
        let catalog =
            PatternCatalog::new(vec![pattern("a", Family::Deletion), pattern("b", Family::Distortion)])
                .unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = PatternCatalog::new(vec![
            pattern("a", Family::Deletion),
            pattern("a", Family::Generalization),
        ])
        .unwrap_err();
        assert!(matches!(err, ContentError::DuplicatePattern(id) if id == "a"));
    }

    #[test]
    fn structural_error_rejected() {
        let mut bad = pattern("a", Family::Deletion);
        bad.problem_options.pop();
        let err = PatternCatalog::new(vec![bad]).unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
    }

    #[test]
    fn lookup_by_id() {
        let catalog = PatternCatalog::new(vec![pattern("a", Family::Deletion)]).unwrap();
        assert!(catalog.get("a").is_some());
        assert!(catalog.get("missing").is_none());
        assert!(catalog.require("a").is_ok());
        assert!(matches!(
            catalog.require("missing"),
            Err(ContentError::PatternNotFound(_))
        ));
    }

    #[test]
    fn filter_by_family() {
        let catalog = PatternCatalog::new(vec![
            pattern("a", Family::Deletion),
            pattern("b", Family::Distortion),
            pattern("c", Family::Deletion),
        ])
        .unwrap();
        let deletions: Vec<_> = catalog.by_family(Family::Deletion).collect();
        assert_eq!(deletions.len(), 2);
        assert_eq!(deletions[0].id, "a");
        assert_eq!(deletions[1].id, "c");
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            PatternCatalog::from_json_str("{ not json"),
            Err(ContentError::Parse(_))
        ));
    }
}
