use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::journal::EmotionalState;

#[derive(Parser)]
#[command(name = "justdad")]
#[command(about = "Journal and writing-streak tracker for the JustDad companion")]
#[command(long_about = "justdad - journal entries, tags, moods and writing streaks

Write short journal entries from the terminal, tag them, record how you
felt, and keep an eye on your writing streak.

QUICK START:
  justdad add \"Picked the kids up from school #visit\"
  justdad add \"Hard day\" --emotion anxious --tag court
  justdad list --limit 5
  justdad stats              Dashboard with counts, tags and streaks

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Path to the config file (default: ~/.justdad/config.yaml)
    #[arg(long, global = true, env = "JUSTDAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the journal database (default: ~/.justdad/justdad.db)
    #[arg(long, global = true, env = "JUSTDAD_DB")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a journal entry
    ///
    /// Entries with `--emotion` are recorded as guided entries and show up
    /// in the mood trend. `#hashtags` in the text are added as tags.
    ///
    /// # Examples
    ///
    ///   justdad add "Soccer practice went great #weekend"
    ///   justdad add "Mediation today" --emotion anxious --intensity 8
    ///   justdad add "Catching up" --date 2024-05-01 --title "Old notes"
    #[command(alias = "a")]
    Add(AddArgs),

    /// List recent entries
    #[command(alias = "ls")]
    List {
        /// Maximum number of entries to show
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,

        /// Only entries with this tag
        #[arg(long, short = 't')]
        tag: Option<String>,
    },

    /// Show a single entry
    Show {
        /// Entry ID
        id: String,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry ID
        id: String,
    },

    /// Journal statistics and streaks
    ///
    /// # Subcommands
    ///
    ///   summary  Counts, average length, tags and streaks (default)
    ///   tags     Tag frequency chart
    ///   trends   Daily entries and mood trend
    ///   streak   Current and longest streak
    Stats(StatsArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `add`.
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Entry text
    pub content: String,

    /// Tag to attach (repeatable)
    #[arg(long = "tag", short = 't')]
    pub tags: Vec<String>,

    /// How you are feeling; makes this a guided entry
    #[arg(long, short = 'e', value_parser = parse_emotion)]
    pub emotion: Option<EmotionalState>,

    /// The question this entry answers (guided entries only)
    #[arg(long, requires = "emotion")]
    pub prompt: Option<String>,

    /// Intensity of the feeling, 1-10 (guided entries only)
    #[arg(long, requires = "emotion", value_parser = clap::value_parser!(u8).range(1..=10))]
    pub intensity: Option<u8>,

    /// Related visit identifier (guided entries only)
    #[arg(long, requires = "emotion")]
    pub visit: Option<String>,

    /// Title for a free-form entry
    #[arg(long, conflicts_with = "emotion")]
    pub title: Option<String>,

    /// Backdate the entry (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for `stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Compute as of this instant (RFC 3339) instead of now
    #[arg(long, global = true, value_parser = parse_instant)]
    pub now: Option<DateTime<FixedOffset>>,

    #[command(subcommand)]
    pub command: Option<StatsCommands>,
}

/// Statistics subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsCommands {
    /// Counts, average length, top tags and streaks
    Summary,

    /// Tag frequency chart
    Tags,

    /// Entries per day and dominant mood per day
    Trends {
        /// Number of days to show (default: journal.trend_days)
        #[arg(long, short = 'd')]
        days: Option<usize>,
    },

    /// Current and longest writing streak
    Streak,
}

fn parse_emotion(s: &str) -> Result<EmotionalState, String> {
    s.parse::<EmotionalState>().map_err(|e| e.to_string())
}

fn parse_instant(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}
