//! Inline hashtag extraction.
//!
//! `justdad add "soccer practice with Mia #weekend #visit"` files the entry
//! under `weekend` and `visit` in addition to any `--tag` flags.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)#([\w-]+)").unwrap_or_else(|e| panic!("Invalid tag regex: {e}")));

/// Extract `#tag` tokens from entry text, lowercased, in order of appearance.
#[must_use]
pub fn extract_hashtags(content: &str) -> Vec<String> {
    TAG_PATTERN
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Normalize a user-supplied tag: trim, strip a leading `#`, lowercase.
///
/// Returns `None` for tags that are empty after normalization.
#[must_use]
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim().trim_start_matches('#').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_hashtags() {
        let tags = extract_hashtags("pickup at 5 #Visit and then #school-run");
        assert_eq!(tags, vec!["visit", "school-run"]);
    }

    #[test]
    fn test_extract_hashtags_at_start() {
        assert_eq!(extract_hashtags("#dentist checkup"), vec!["dentist"]);
    }

    #[test]
    fn test_ignores_inline_hash() {
        assert!(extract_hashtags("issue#42 is not a tag").is_empty());
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag(" #School "), Some("school".to_string()));
        assert_eq!(normalize_tag("#"), None);
        assert_eq!(normalize_tag("   "), None);
    }
}
