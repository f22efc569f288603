//! Shared row-build policy for the tabular encoders.
//!
//! The spreadsheet and delimited-table outputs render the same cells in
//! the same order; the spreadsheet profile simply omits the updated date
//! and character count. Both header lists are a compatibility contract
//! for downstream consumers and must not change.

use crate::derive::{DerivedFields, derive};
use crate::post::Post;

/// Spreadsheet header row, in column order.
pub const SPREADSHEET_HEADERS: [&str; 7] = [
    "ID",
    "Title",
    "Summary",
    "Tags",
    "Published",
    "Created Date",
    "Word Count",
];

/// Delimited-table header row, in column order.
pub const DELIMITED_HEADERS: [&str; 9] = [
    "ID",
    "Title",
    "Summary",
    "Tags",
    "Published",
    "Created Date",
    "Updated Date",
    "Word Count",
    "Character Count",
];

/// One fully-derived table row.
pub(crate) struct Row {
    pub id: u64,
    pub title: String,
    pub summary: String,
    pub tags: String,
    pub published: &'static str,
    pub created: String,
    pub updated: String,
    pub word_count: usize,
    pub char_count: usize,
}

impl Row {
    pub fn from_post(post: &Post) -> Self {
        let DerivedFields {
            word_count,
            char_count,
            created_compact,
            updated_compact,
            summary,
            tags,
            ..
        } = derive(post);
        Row {
            id: post.id,
            title: post.title.clone(),
            summary: summary.unwrap_or_default(),
            tags: tags.unwrap_or_default(),
            published: if post.published { "Yes" } else { "No" },
            created: created_compact,
            updated: updated_compact,
            word_count,
            char_count,
        }
    }
}
