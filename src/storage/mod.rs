//! Storage layer for justdad.
//!
//! This module provides SQLite-based persistence for journal entries and
//! their tags. Schema changes are applied through numbered migrations.

mod database;
mod migrations;

pub use database::Database;
