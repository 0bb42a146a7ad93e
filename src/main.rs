use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use focusflow::cli::args::{Cli, Commands};
use focusflow::cli::commands::{self, FocusOperation};
use focusflow::config::{Config, Paths};
use focusflow::storage::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    focusflow::init_tracing(cli.verbose);

    let load = || Config::load().context("Failed to load configuration");

    let operation = match cli.command {
        Commands::Status => FocusOperation::Status,
        Commands::Start => FocusOperation::Start,
        Commands::Pause => FocusOperation::Pause,
        Commands::Reset => FocusOperation::Reset,
        Commands::Stop => FocusOperation::Stop,
        Commands::Mode { mode } => FocusOperation::Mode(mode.into()),
        Commands::Phase { phase } => FocusOperation::Phase(phase.into()),
        Commands::Tick { count, span } => {
            FocusOperation::Tick(commands::tick_count(count, span.as_deref())?)
        }
        Commands::Config(args) => {
            // Out-of-range values must not lock out the commands that fix them.
            let config = Config::load_unvalidated().context("Failed to load configuration")?;
            let format = cli.output.unwrap_or(config.general.default_output);
            let paths = Paths::new()?;
            println!("{}", commands::config(&paths, config, args.command, format)?);
            return Ok(());
        }
        Commands::Stats { days } => {
            let config = load()?;
            let format = cli.output.unwrap_or(config.general.default_output);
            let db = Database::open().context("Failed to open database")?;
            println!("{}", commands::stats(&db, days, format)?);
            return Ok(());
        }
        Commands::Run => {
            let config = load()?;
            let db = Database::open().context("Failed to open database")?;
            focusflow::tui::run(&db, &config)?;
            return Ok(());
        }
    };

    let config = load()?;
    let format = cli.output.unwrap_or(config.general.default_output);
    let db = Database::open().context("Failed to open database")?;
    let output = commands::focus(&db, &config, operation, format)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
