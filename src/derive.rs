//! Derived presentation fields, computed fresh for every export call.
//!
//! Everything here is a pure function of the post's own fields: no caches,
//! no shared state, no I/O. Concurrent exports of the same posts never
//! interfere because each call recomputes from the data it was handed.

use chrono::NaiveDateTime;
use memchr::memchr;

use crate::post::Post;

/// Values computed from a [`Post`] solely for presentation.
///
/// Optionality of summary and tags is resolved here once (trimmed, `None`
/// when empty) so renderers branch on a clean `Option` instead of
/// re-checking raw fields.
#[derive(Debug, Clone)]
pub struct DerivedFields {
    /// Content with markup tags removed, trimmed.
    pub clean_text: String,
    /// Maximal non-whitespace runs in `clean_text`; 0 when empty.
    pub word_count: usize,
    /// Length of `clean_text` in Unicode code points.
    pub char_count: usize,
    /// Creation timestamp, `YYYY-MM-DD HH:MM` profile (tabular formats).
    pub created_compact: String,
    /// Update timestamp, `YYYY-MM-DD HH:MM` profile (tabular formats).
    pub updated_compact: String,
    /// Creation timestamp, `Month DD, YYYY` profile (rich-text and print).
    pub created_long: String,
    pub summary: Option<String>,
    pub tags: Option<String>,
}

/// Compute the derived fields for one post.
pub fn derive(post: &Post) -> DerivedFields {
    let clean_text = clean_text(&post.content);
    let word_count = clean_text.split_whitespace().count();
    let char_count = clean_text.chars().count();
    DerivedFields {
        word_count,
        char_count,
        created_compact: compact_datetime(post.created_at),
        updated_compact: compact_datetime(post.updated_at),
        created_long: long_date(post.created_at),
        summary: nonempty(post.summary.as_deref()),
        tags: nonempty(post.tags.as_deref()),
        clean_text,
    }
}

/// Remove every well-formed `<...>` tag from `content`, then trim.
///
/// A `<` with no `>` anywhere after it is ordinary text and survives, as
/// does everything following it. Tags never nest for this purpose: a tag
/// runs from `<` to the next `>`, whatever is in between.
pub fn clean_text(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut out = String::with_capacity(content.len());
    let mut pos = 0;
    while pos < bytes.len() {
        let Some(rel) = memchr(b'<', &bytes[pos..]) else {
            out.push_str(&content[pos..]);
            break;
        };
        let lt = pos + rel;
        out.push_str(&content[pos..lt]);
        match memchr(b'>', &bytes[lt..]) {
            Some(rel_gt) => pos = lt + rel_gt + 1,
            None => {
                out.push_str(&content[lt..]);
                break;
            }
        }
    }
    out.trim().to_string()
}

/// `YYYY-MM-DD HH:MM`
pub fn compact_datetime(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// `Month DD, YYYY`
pub fn long_date(ts: NaiveDateTime) -> String {
    ts.format("%B %d, %Y").to_string()
}

/// `Month DD, YYYY at HH:MM` (generation stamps in print collections)
pub fn long_datetime(ts: NaiveDateTime) -> String {
    ts.format("%B %d, %Y at %H:%M").to_string()
}

fn nonempty(field: Option<&str>) -> Option<String> {
    let trimmed = field.unwrap_or("").trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
