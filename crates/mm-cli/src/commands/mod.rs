pub mod check;
pub mod list;
pub mod play;
pub mod show;

use std::path::Path;

use colored::Colorize;

use mm_content::{Family, PatternCatalog, validate_catalog};

/// Load and strictly validate a content file, surfacing any warnings.
/// Returns the catalog only if it has no structural errors.
fn load_catalog(path: &Path) -> Result<PatternCatalog, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let catalog = PatternCatalog::from_json_str(&raw).map_err(|e| e.to_string())?;

    // Errors were rejected above; what remains are warnings.
    for issue in validate_catalog(&catalog) {
        eprintln!("{}", issue.to_string().yellow());
    }

    Ok(catalog)
}

/// Parse a family name given on the command line.
fn parse_family(s: &str) -> Result<Family, String> {
    match s.to_lowercase().as_str() {
        "deletion" => Ok(Family::Deletion),
        "distortion" => Ok(Family::Distortion),
        "generalization" => Ok(Family::Generalization),
        other => Err(format!(
            "unknown family '{other}', use: deletion, distortion, generalization"
        )),
    }
}
