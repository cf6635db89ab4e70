use std::path::Path;

use colored::Colorize;

use mm_content::{PatternCatalog, validate_catalog};

pub fn run(file: &Path) -> Result<(), String> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;

    // Parse without the strict constructor so every issue gets listed,
    // not just the first error.
    let catalog: PatternCatalog =
        serde_json::from_str(&raw).map_err(|e| format!("content parse error: {e}"))?;

    let issues = validate_catalog(&catalog);
    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;

    for issue in &issues {
        if issue.is_error {
            eprintln!("{}", issue.to_string().red());
        } else {
            eprintln!("{}", issue.to_string().yellow());
        }
    }

    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
        return Err("content check failed".into());
    }

    if warnings > 0 {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
    println!(
        "  All checks passed: {} pattern{}.",
        catalog.len(),
        if catalog.len() == 1 { "" } else { "s" },
    );

    Ok(())
}
