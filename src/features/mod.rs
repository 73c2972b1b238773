//! Feature implementations for justdad.
//!
//! - Statistics: counts, tags, mood trend and writing streaks

pub mod stats;
