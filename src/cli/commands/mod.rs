//! Command implementations for justdad.

mod completions;
mod journal;
mod stats;

pub use completions::completions;
pub use journal::{add, build_entry, delete, list, show};
pub use stats::stats;
