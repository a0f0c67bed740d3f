//! Splitting comma/"and"-separated lists into segments.

use regex::Regex;
use std::sync::LazyLock;

// Leftmost-first alternation: ", and " beats ", " beats " and ".
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*,\s*and\s+|\s*,\s*|\s+and\s+").unwrap());

static REMAINING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bremaining\b").unwrap());

static FILLER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:all|al)\b").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Split a list on the separators, trimming and dropping empty pieces.
pub fn split_segments(list: &str) -> Vec<String> {
    SEPARATOR
        .split(list)
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Allocation segments with the word "remaining" removed from each.
///
/// Splitting happens before stripping; a segment that held only "remaining"
/// ends up empty and is dropped.
pub fn allocation_segments(list: &str) -> Vec<String> {
    split_segments(list)
        .into_iter()
        .map(|segment| collapse_whitespace(&REMAINING.replace_all(&segment, " ")))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Asset segments with the filler words "all"/"al" removed before splitting.
pub fn asset_segments(list: &str) -> Vec<String> {
    split_segments(&FILLER.replace_all(list, " "))
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
