use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use justdad::cli::args::{Cli, Commands};
use justdad::cli::commands;
use justdad::config::Config;
use justdad::error::JustDadError;
use justdad::journal::{JournalStore, SystemClock};
use justdad::storage::Database;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("JUSTDAD_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), JustDadError> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::completions(shell)?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let format = cli.output.unwrap_or(config.general.default_output);

    let store = match &cli.database {
        Some(path) => JournalStore::with_database(Database::open_at(path)?),
        None => JournalStore::new()?,
    };
    let clock = SystemClock;

    let output = match cli.command {
        Commands::Add(args) => commands::add(&store, &clock, args, format)?,
        Commands::List { limit, tag } => {
            commands::list(&store, &clock, limit, tag.as_deref(), format)?
        },
        Commands::Show { id } => commands::show(&store, &clock, &id, format)?,
        Commands::Delete { id } => commands::delete(&store, &id, format)?,
        Commands::Stats(args) => commands::stats(&store, &clock, &config.journal, &args, format)?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
