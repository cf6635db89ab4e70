use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(file: &Path, family: Option<&str>) -> Result<(), String> {
    let catalog = super::load_catalog(file)?;

    let filter = family.map(super::parse_family).transpose()?;

    let patterns: Vec<_> = catalog
        .patterns
        .iter()
        .filter(|p| filter.is_none_or(|f| p.family == f))
        .collect();

    if patterns.is_empty() {
        println!("  No patterns found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Family", "Name", "Problem"]);

    for pattern in &patterns {
        let problem = if pattern.problem.one_liner.chars().count() > 40 {
            let short: String = pattern.problem.one_liner.chars().take(37).collect();
            format!("{short}...")
        } else {
            pattern.problem.one_liner.clone()
        };
        table.add_row(vec![
            &pattern.id,
            &format!("{} ({})", pattern.family, pattern.family.hebrew_name()),
            &pattern.name,
            &problem,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} pattern{}",
        patterns.len(),
        if patterns.len() == 1 { "" } else { "s" },
    );

    Ok(())
}
