//! DailyContent domain model.

use serde::{Deserialize, Serialize};

use crate::day::Day;

/// One verse of the day's chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptureVerse {
    pub verse: u32,
    pub text: String,
}

/// The devotional content for one day.
///
/// Produced by the provider and never mutated afterwards; the cache hands
/// out shared references to the same value.
///
/// Field names serialize in camelCase, matching both the provider's response
/// schema and the persisted cache blobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyContent {
    pub day: Day,
    /// e.g. "Provérbios 3"
    pub scripture_reference: String,
    /// Ordered by verse number; empty if the provider omitted it.
    #[serde(default)]
    pub scripture_verses: Vec<ScriptureVerse>,
    /// May embed `**bold**` spans.
    pub interpretation: String,
    pub practical_steps: Vec<String>,
    pub reflection_question: String,
    pub historical_curiosity: String,
}

impl DailyContent {
    /// Sorts verses by verse number. Providers usually return them in order,
    /// but nothing in the response contract enforces it.
    pub fn with_sorted_verses(mut self) -> Self {
        self.scripture_verses.sort_by_key(|v| v.verse);
        self
    }
}

/// A run of text inside a field that may carry `**bold**` markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSpan<'a> {
    Plain(&'a str),
    Bold(&'a str),
}

/// Splits text on `**...**` markers.
///
/// An unmatched trailing `**` is kept as plain text.
pub fn parse_bold_spans(text: &str) -> Vec<TextSpan<'_>> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after_open = &rest[start + 2..];
        let Some(len) = after_open.find("**") else {
            break;
        };
        if start > 0 {
            spans.push(TextSpan::Plain(&rest[..start]));
        }
        spans.push(TextSpan::Bold(&after_open[..len]));
        rest = &after_open[len + 2..];
    }

    if !rest.is_empty() {
        spans.push(TextSpan::Plain(rest));
    }
    spans
}
