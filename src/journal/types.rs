//! Journal entry model.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::JustDadError;

/// How the writer was feeling when an entry was written.
///
/// Every variant carries a fixed rank from 1 (heaviest) to 9 (lightest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Overwhelmed,
    Sad,
    Anxious,
    Frustrated,
    Neutral,
    Calm,
    Hopeful,
    Happy,
    Grateful,
}

impl EmotionalState {
    /// All emotional states, ordered by rank.
    pub const ALL: [Self; 9] = [
        Self::Overwhelmed,
        Self::Sad,
        Self::Anxious,
        Self::Frustrated,
        Self::Neutral,
        Self::Calm,
        Self::Hopeful,
        Self::Happy,
        Self::Grateful,
    ];

    /// Integer rank associated with the state.
    #[must_use]
    pub const fn rank(self) -> u32 {
        match self {
            Self::Overwhelmed => 1,
            Self::Sad => 2,
            Self::Anxious => 3,
            Self::Frustrated => 4,
            Self::Neutral => 5,
            Self::Calm => 6,
            Self::Hopeful => 7,
            Self::Happy => 8,
            Self::Grateful => 9,
        }
    }

    /// Lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overwhelmed => "overwhelmed",
            Self::Sad => "sad",
            Self::Anxious => "anxious",
            Self::Frustrated => "frustrated",
            Self::Neutral => "neutral",
            Self::Calm => "calm",
            Self::Hopeful => "hopeful",
            Self::Happy => "happy",
            Self::Grateful => "grateful",
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionalState {
    type Err = JustDadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == needle)
            .ok_or_else(|| JustDadError::Parse(format!("Unknown emotional state: {s}")))
    }
}

/// Extra context captured with a guided ("intelligent") entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// The guided question the entry answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Self-rated intensity, 1-10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,
    /// Identifier of a visit the entry relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_visit: Option<String>,
}

/// Classification of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryKind {
    /// Guided entry with a recorded emotion.
    Intelligent {
        emotion: EmotionalState,
        #[serde(default)]
        metadata: EntryMetadata,
    },
    /// Free-form entry without an emotion.
    Traditional {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

impl EntryKind {
    /// The recorded emotion, if this is an intelligent entry.
    #[must_use]
    pub const fn emotion(&self) -> Option<EmotionalState> {
        match self {
            Self::Intelligent { emotion, .. } => Some(*emotion),
            Self::Traditional { .. } => None,
        }
    }

    /// Storage label for the kind.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Intelligent { .. } => "intelligent",
            Self::Traditional { .. } => "traditional",
        }
    }
}

/// A single journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub content: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl JournalEntry {
    /// Create a new entry with a fresh identifier.
    #[must_use]
    pub fn new(date: DateTime<Utc>, content: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            content: content.into(),
            tags: BTreeSet::new(),
            kind,
        }
    }

    /// Builder-style helper to attach tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Number of whitespace-delimited words in the content.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}
