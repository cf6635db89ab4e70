//! Shared fixtures for the engine test modules.

use mm_content::{AuthoredOption, Family, GoodQuestion, Pattern, PatternCatalog, Statement, TrapQuestion};

/// A structurally valid pattern with pools of the given sizes.
pub(crate) fn pattern_with_pools(id: &str, good: usize, trap: usize) -> Pattern {
    let good_questions = (0..good)
        .map(|i| GoodQuestion {
            id: format!("g{i}"),
            text: format!("שאלה מבררת {i}: מה בדיוק קרה?"),
        })
        .collect();
    let trap_questions = (0..trap)
        .map(|i| TrapQuestion {
            id: format!("t{i}"),
            text: format!("שאלה מכשילה {i}: למה אתה כזה?"),
            reason: format!("נימוק {i}: השאלה שיפוטית ואינה מבררת."),
        })
        .collect();
    let options = |prefix: &str, correct_index: usize| -> Vec<AuthoredOption> {
        (0..5)
            .map(|i| AuthoredOption {
                id: format!("{prefix}{i}"),
                text: format!("ניסוח {prefix}{i}"),
                correct: i == correct_index,
            })
            .collect()
    };

    Pattern {
        id: id.to_string(),
        family: Family::Deletion,
        name: format!("דפוס {id}"),
        definition: "הגדרה קצרה של הדפוס.".to_string(),
        problem: Statement {
            one_liner: "כולם תמיד נגדי.".to_string(),
        },
        goal: Statement {
            one_liner: "לאתר מקרה נגדי אחד לפחות.".to_string(),
        },
        good_questions,
        trap_questions,
        problem_options: options("pr", 2),
        goal_options: options("go", 1),
    }
}

/// A catalog of `n` valid patterns `p0..`, families cycling through all three.
pub(crate) fn catalog_of(n: usize) -> PatternCatalog {
    let families = Family::all();
    let patterns = (0..n)
        .map(|i| {
            let mut p = pattern_with_pools(&format!("p{i}"), 3, 4);
            p.family = families[i % families.len()];
            p
        })
        .collect();
    PatternCatalog::new(patterns).expect("fixture catalog is valid")
}
