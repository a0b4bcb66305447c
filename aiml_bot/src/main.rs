//! The interactive command-line chatbot.
//!
//! Loads (or rebuilds) a compiled "brain" file, then reads lines from stdin
//! and prints the bot's responses until end of input, saving the brain on
//! the way out.

use aiml_bot::{Bot, DEFAULT_SESSION_ID};
use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aiml-bot", version, about = "A bare-bones AIML chatbot")]
struct Cli {
    /// Path to the .brn "brain file" where the compiled AIML is stored.
    brain_path: Option<PathBuf>,

    /// Reset the brain file, rebuilding it from the AIML rules.
    #[arg(short = 'r', long = "reset")]
    reset: bool,

    /// Do not automatically load the standard AIML rules.
    #[arg(short = 'n', long = "no-std")]
    no_std: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = error.print();
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            let _ = error.print();
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let brain_path = brain_path(cli.brain_path);
    if let Some(parent) = brain_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
    }
    // A missing brain file implies a rebuild.
    let reset = cli.reset || !brain_path.is_file();

    let robot = if reset {
        None
    } else {
        match Bot::builder().brain_file(&brain_path).build() {
            Ok(bot) => Some(bot),
            Err(error) => {
                eprintln!("Error loading saved brain file: {error}");
                None
            }
        }
    };

    let robot = match robot {
        Some(bot) => bot,
        None => {
            println!("Resetting.");
            let mut builder = Bot::builder();
            if !cli.no_std {
                builder = builder.command("load std aiml");
            }
            let bot = builder
                .build()
                .context("failed to rebuild the bot from AIML rules")?;
            // Save right away so the next start skips the rebuild.
            if let Err(error) = bot.save_brain(&brain_path) {
                eprintln!("Error saving brain file: {error}");
            }
            bot
        }
    };

    println!("\nINTERACTIVE MODE (ctrl-d to exit)");
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        println!("{}", robot.respond(line.trim_end(), DEFAULT_SESSION_ID));
    }

    if let Err(error) = robot.save_brain(&brain_path) {
        eprintln!("Error saving brain file: {error}");
    }
    Ok(())
}

/// Resolve the brain path argument: default to `~/.aiml/default.brn`, and
/// append the `.brn` suffix when it is missing.
fn brain_path(argument: Option<PathBuf>) -> PathBuf {
    let path = argument.unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".aiml")
            .join("default.brn")
    });
    let display = path.to_string_lossy();
    if display.ends_with(".brn") {
        path
    } else {
        PathBuf::from(format!("{display}.brn"))
    }
}
