//! CLI frontend for the Meta-Model trainer.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mmt",
    about = "Meta-Model trainer — drills for spotting linguistic patterns",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a content file and report every issue found
    Check {
        /// Path to the patterns JSON file
        file: PathBuf,
    },

    /// List the patterns in a content file
    List {
        /// Path to the patterns JSON file
        file: PathBuf,

        /// Filter by family (deletion, distortion, generalization)
        #[arg(short, long)]
        family: Option<String>,
    },

    /// Show one pattern in full
    Show {
        /// Path to the patterns JSON file
        file: PathBuf,

        /// Pattern id
        id: String,
    },

    /// Play an interactive training session
    Play {
        /// Path to the patterns JSON file
        file: PathBuf,

        /// Session mode: learning or exam
        #[arg(short, long, default_value = "learning")]
        mode: String,

        /// RNG seed (number or text) for a reproducible session
        #[arg(short, long, default_value = "42")]
        seed: String,

        /// Restrict the session to specific pattern ids (repeatable)
        #[arg(short, long)]
        pattern: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file } => commands::check::run(&file),
        Commands::List { file, family } => commands::list::run(&file, family.as_deref()),
        Commands::Show { file, id } => commands::show::run(&file, &id),
        Commands::Play {
            file,
            mode,
            seed,
            pattern,
        } => commands::play::run(&file, &mode, &seed, &pattern),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
