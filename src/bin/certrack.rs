//! # certrack
//!
//! Interactive menu for tracking employee certifications and renewal reminders.
//!
//! Usage: `cargo run --bin certrack`

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use dialoguer::{theme::ColorfulTheme, Select};
use log::{error, info};
use std::io;

use certrack::commands::{self, CommandContext, DialoguerPrompter, Prompter, MENU};
use certrack::{Config, Database};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str())
    ).init();

    info!("Opening certification store at {}", config.database_path);
    let database = Database::new(&config.database_path)?;

    let mut ctx = CommandContext::new(config, database);
    let registry = commands::build_registry();
    let mut prompter = DialoguerPrompter;

    let labels: Vec<String> = MENU
        .iter()
        .enumerate()
        .map(|(i, (_, label))| format!("{}. {label}", i + 1))
        .collect();
    let mut last_output = String::new();

    loop {
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        println!("Certification Tracker");
        println!("=====================\n");
        if !last_output.is_empty() {
            println!("{last_output}");
        }

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Choose an option")
            .items(&labels)
            .default(0)
            .interact()?;

        let (name, _) = MENU[choice];
        if name == "exit" {
            if confirm_exit(&ctx, &mut prompter)? {
                println!("Exiting the program.");
                break;
            }
            last_output.clear();
            continue;
        }

        last_output = match commands::dispatch(&registry, name, &mut ctx, &mut prompter) {
            Ok(output) => output,
            Err(e) => {
                error!("Command '{name}' failed: {e:#}");
                format!("Error: {e:#}\n")
            }
        };
    }

    Ok(())
}

/// Ask before leaving, warning when the session has unsaved changes
fn confirm_exit(ctx: &CommandContext, prompter: &mut dyn Prompter) -> Result<bool> {
    if ctx.loaded && ctx.session.is_dirty() {
        println!("Warning: you have unsaved changes.");
    }
    prompter.confirm("Are you sure you want to exit? (y/N)")
}
