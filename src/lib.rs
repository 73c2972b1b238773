//! justdad - journal statistics and streak tracking
//!
//! This crate stores journal entries locally and computes statistics over
//! them: weekly and monthly counts, average length, most-used tags, the
//! dominant mood per day and writing streaks.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod journal;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::JustDadError;
pub use features::stats::JournalStatistics;
pub use journal::{JournalEntry, JournalStore};
