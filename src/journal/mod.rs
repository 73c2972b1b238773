//! Journal entries and their persistence.
//!
//! - [`types`]: the entry model (`JournalEntry`, `EntryKind`, `EmotionalState`)
//! - [`store`]: SQLite-backed entry storage and the `EntrySource` seam
//! - [`clock`]: the reference-time source used by statistics
//! - [`tags`]: inline hashtag handling

pub mod clock;
pub mod store;
pub mod tags;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use store::{EntrySource, JournalStore};
pub use tags::{extract_hashtags, normalize_tag};
pub use types::{EmotionalState, EntryKind, EntryMetadata, JournalEntry};
