use std::path::Path;

use colored::Colorize;

pub fn run(file: &Path, id: &str) -> Result<(), String> {
    let catalog = super::load_catalog(file)?;

    let pattern = catalog
        .get(id)
        .ok_or_else(|| format!("pattern not found: \"{id}\""))?;

    println!(
        "  {} [{} — {}]",
        pattern.name.bold(),
        pattern.family.to_string().dimmed(),
        pattern.family.hebrew_name(),
    );
    println!();
    println!("  {}", pattern.definition);
    println!();
    println!("  problem: {}", pattern.problem.one_liner);
    println!("  goal:    {}", pattern.goal.one_liner);
    println!();

    println!("  clarifying questions:");
    for q in &pattern.good_questions {
        println!("    [{}] {}", q.id, q.text);
    }
    println!("  trap questions:");
    for q in &pattern.trap_questions {
        println!("    [{}] {} — {}", q.id, q.text, q.reason.dimmed());
    }

    println!("  problem options:");
    for o in &pattern.problem_options {
        let mark = if o.correct { "*" } else { " " };
        println!("   {mark}[{}] {}", o.id, o.text);
    }
    println!("  goal options:");
    for o in &pattern.goal_options {
        let mark = if o.correct { "*" } else { " " };
        println!("   {mark}[{}] {}", o.id, o.text);
    }

    Ok(())
}
