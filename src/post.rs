//! Input model for export: posts and their authors.
//!
//! These are read-only views over data the caller has already loaded and
//! authorized. The export pipeline never mutates or persists them.

use chrono::NaiveDateTime;

/// The author of a post (embedded reference).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct Author {
    pub id: u64,
    /// Login name, used in attachment filenames.
    pub username: String,
    /// Display name, used in rendered output.
    pub full_name: String,
}

/// A single blog entry with markup-bearing content.
///
/// `content` is trusted HTML meant for direct rendering in the print
/// format; tabular and rich-text targets strip its tags first.
/// Timestamps carry no timezone; they are rendered as-is.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    /// Comma-separated tag list.
    pub tags: Option<String>,
    pub published: bool,
    pub author: Author,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Post {
    /// Tags split on commas, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        match &self.tags {
            Some(tags) => tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}
