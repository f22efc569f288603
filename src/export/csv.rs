//! Delimited-table (CSV) encoder.
//!
//! Text columns go through [`csv_field`]; numeric columns (id, word count,
//! character count) are written raw. Lines end with `\n`.

use crate::escape::csv_field;
use crate::post::Post;

use super::tabular::{DELIMITED_HEADERS, Row};

/// Render the delimited table for `posts`, one row per post in input
/// order, preceded by the fixed header row.
pub fn write_delimited(posts: &[Post]) -> String {
    let mut out = String::new();

    let headers: Vec<String> = DELIMITED_HEADERS.iter().map(|h| csv_field(h)).collect();
    out.push_str(&headers.join(","));
    out.push('\n');

    for post in posts {
        let row = Row::from_post(post);
        let fields = [
            row.id.to_string(),
            csv_field(&row.title),
            csv_field(&row.summary),
            csv_field(&row.tags),
            csv_field(row.published),
            csv_field(&row.created),
            csv_field(&row.updated),
            row.word_count.to_string(),
            row.char_count.to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}
