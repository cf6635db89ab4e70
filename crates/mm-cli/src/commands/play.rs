use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use mm_engine::{
    AnswerFeedback, EndReason, Mode, Seed, Session, SessionInput, SessionReport, Stage,
};

pub fn run(file: &Path, mode: &str, seed: &str, pattern_ids: &[String]) -> Result<(), String> {
    let catalog = super::load_catalog(file)?;

    let mut input = SessionInput::new(catalog)
        .with_mode(Mode::parse(mode))
        .with_seed(parse_seed(seed));
    if !pattern_ids.is_empty() {
        input = input.with_enabled_patterns(pattern_ids.to_vec());
    }

    let mut session =
        Session::new(input).map_err(|e| format!("failed to start session: {e}"))?;

    println!("  {} Meta-Model session", "Starting".bold());
    println!(
        "  Mode: {} | Seed: {} | Time: {}s | Lives: {}",
        session.mode(),
        session.seed(),
        session.time_left(),
        session.lives(),
    );
    println!("  Answer with an option number. 'next' starts a new round, 'quit' ends.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();
    let mut last_prompt = Instant::now();

    loop {
        if session.is_ended() {
            break;
        }
        render_stage(&session);

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        // The wall clock kept running while we waited for input.
        if !session.is_paused() {
            let elapsed = last_prompt.elapsed().as_secs() as u32;
            if elapsed > 0 {
                let _ = session.tick(elapsed);
            }
        }
        last_prompt = Instant::now();
        if session.is_ended() {
            println!("{}\n", "Time is up!".red().bold());
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "q" => {
                session.end(Some(EndReason::Manual));
                break;
            }
            "next" | "n" => {
                if let Err(e) = session.next_round() {
                    println!("{}\n", e.to_string().yellow());
                }
            }
            "pause" => match session.pause() {
                Ok(()) => println!("{}\n", "Paused. Type 'resume' to continue.".dimmed()),
                Err(e) => println!("{}\n", e.to_string().yellow()),
            },
            "resume" => {
                if let Err(e) = session.resume() {
                    println!("{}\n", e.to_string().yellow());
                }
            }
            "status" => print_status(&session),
            other => answer(&mut session, other),
        }
    }

    let report = session.end(None);
    print_report(&report);
    Ok(())
}

/// Numeric seeds are used directly; anything else is a text seed.
fn parse_seed(s: &str) -> Seed {
    match s.parse::<u32>() {
        Ok(n) => Seed::Number(n),
        Err(_) => Seed::Text(s.to_string()),
    }
}

fn render_stage(session: &Session) {
    let round = session.current_round();
    let pattern = &session.patterns()[round.pattern_index()];

    match round.stage() {
        Stage::Summary => {
            println!(
                "  {}",
                "Round finished — type 'next' for a new round, 'quit' to stop.".dimmed()
            );
            return;
        }
        Stage::Question => {
            println!("  «{}»", pattern.problem.one_liner.bold());
            if session.mode() == Mode::Learning {
                println!("  {}", pattern.definition.dimmed());
            }
            println!("  Which question opens the pattern up?");
        }
        Stage::Problem => {
            println!("  «{}»", pattern.problem.one_liner.bold());
            println!("  What is the problem being voiced?");
        }
        Stage::Goal => {
            println!("  «{}»", pattern.problem.one_liner.bold());
            println!("  What should the clarification aim for?");
        }
    }

    if let Some(options) = round.current_options() {
        for (i, option) in options.iter().enumerate() {
            println!("   {}. {}", i + 1, option.text);
        }
    }
    println!(
        "  [{}s | score {} | streak {} | lives {}]",
        session.time_left(),
        session.score(),
        session.streak(),
        session.lives(),
    );
}

fn answer(session: &mut Session, input: &str) {
    let option_ids: Vec<String> = match session.current_round().current_options() {
        Some(options) => options.iter().map(|o| o.id.clone()).collect(),
        None => {
            println!(
                "{}\n",
                "The round is complete — type 'next' to continue.".yellow()
            );
            return;
        }
    };

    let choice: usize = match input.parse() {
        Ok(n) if (1..=option_ids.len()).contains(&n) => n,
        _ => {
            println!(
                "{}\n",
                format!("Pick a number between 1 and {}.", option_ids.len()).yellow()
            );
            return;
        }
    };

    match session.submit_answer(&option_ids[choice - 1]) {
        Ok(AnswerFeedback::Correct {
            completed_round,
            score,
            streak,
            ..
        }) => {
            println!(
                "{} score {score}, streak {streak}",
                "Correct!".green().bold()
            );
            if completed_round {
                println!("{}", "Round complete!".bold());
            }
            println!();
        }
        Ok(AnswerFeedback::Incorrect {
            explanation,
            lives_left,
            round_ended,
            ..
        }) => {
            println!("{}", "Wrong.".red().bold());
            if let Some(text) = explanation {
                println!("  {}", text.yellow());
            }
            if let Some(lives) = lives_left {
                println!("  Lives left: {lives}");
            }
            if round_ended {
                println!("  {}", "The round is over.".red());
            }
            println!();
        }
        Err(e) => println!("{}\n", e.to_string().yellow()),
    }
}

fn print_status(session: &Session) {
    let round = session.current_round();
    println!("  Round {} — pattern '{}'", session.rounds().len(), round.pattern_id());
    println!("  Stage: {} | Status: {:?}", round.stage(), round.status());
    println!(
        "  Score: {} | Streak: {} | Completed rounds: {}",
        session.score(),
        session.streak(),
        session.completed_rounds(),
    );
    println!(
        "  Time left: {}s | Lives: {} | Paused: {}\n",
        session.time_left(),
        session.lives(),
        session.is_paused(),
    );
}

fn print_report(report: &SessionReport) {
    println!();
    println!(
        "  {} ({})",
        "Session report".bold(),
        Utc::now().format("%Y-%m-%d %H:%M UTC"),
    );
    let reason = match report.end_reason {
        Some(EndReason::Time) => "time ran out",
        Some(EndReason::Lives) => "out of lives",
        Some(EndReason::Manual) | None => "ended manually",
    };
    println!("  Mode: {} | {}", report.mode, reason);
    println!(
        "  Score: {} | Rounds completed: {} | Accuracy: {}%",
        report.score, report.completed_rounds, report.accuracy,
    );
    println!(
        "  Answers: {} correct, {} wrong",
        report.correct, report.wrong,
    );

    if !report.families.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Family", "Attempts", "Correct", "Wrong", "Accuracy"]);
        for f in &report.families {
            table.add_row(vec![
                format!("{} ({})", f.family, f.family.hebrew_name()),
                f.attempts.to_string(),
                f.correct.to_string(),
                f.wrong.to_string(),
                format!("{}%", f.accuracy),
            ]);
        }
        println!("{table}");
    }

    if !report.weak_patterns.is_empty() {
        println!("  Patterns to revisit:");
        for w in &report.weak_patterns {
            println!(
                "    {} — {}% accuracy ({} wrong)",
                w.pattern_id, w.accuracy, w.wrong,
            );
        }
    }
}
