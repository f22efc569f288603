//! Print-format HTML synthesis.
//!
//! Assembles the intermediate markup document the layout converter turns
//! into a paginated file: a document-level style block, then per post a
//! heading, a metadata line, an optional summary callout, the raw content
//! block, and an optional tag callout. Collection mode adds a collection
//! title, a generation stamp, a publish-state label per post, and a rule
//! between posts.
//!
//! Metadata fields (title, author, summary, tags) are entity-escaped.
//! The content block is trusted HTML meant for direct rendering and
//! passes through verbatim.

use chrono::NaiveDateTime;

use crate::derive::{derive, long_datetime};
use crate::escape::escape_html;
use crate::post::{Author, Post};

/// Typographic rules shared by both print entry points.
const STYLE_BLOCK: &str = "body { font-family: 'Arial', sans-serif; margin: 40px; line-height: 1.6; color: #333; }\
h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }\
h2 { color: #34495e; margin-top: 30px; }\
.post { margin-bottom: 40px; page-break-inside: avoid; }\
.meta { color: #7f8c8d; font-size: 14px; margin-bottom: 15px; }\
.tags { background: #ecf0f1; padding: 8px; border-radius: 4px; margin-top: 10px; }\
.summary { background: #f8f9fa; padding: 15px; border-left: 4px solid #3498db; margin: 15px 0; font-style: italic; }\
hr { border: none; height: 2px; background: #bdc3c7; margin: 30px 0; }";

/// Render the flowing collection document for `posts`.
///
/// `generated_at` is stamped into the header; the caller captures the
/// clock once so rendering itself stays deterministic.
pub fn collection_html(posts: &[Post], author: &Author, generated_at: NaiveDateTime) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><style>");
    html.push_str(STYLE_BLOCK);
    html.push_str("</style></head><body>");

    html.push_str(&format!(
        "<h1>Blog Posts Collection - {}</h1>",
        escape_html(&author.full_name)
    ));
    html.push_str(&format!(
        "<p class='meta'>Generated on: {}</p>",
        long_datetime(generated_at)
    ));

    for post in posts {
        let fields = derive(post);
        let status = if post.published { "Published" } else { "Draft" };

        html.push_str("<div class='post'>");
        html.push_str(&format!("<h2>{}</h2>", escape_html(&post.title)));
        html.push_str(&format!(
            "<p class='meta'><strong>By:</strong> {} | <strong>Created:</strong> {} | <strong>Status:</strong> {}</p>",
            escape_html(&post.author.full_name),
            fields.created_long,
            status
        ));

        if let Some(summary) = &fields.summary {
            html.push_str(&format!(
                "<div class='summary'><strong>Summary:</strong> {}</div>",
                escape_html(summary)
            ));
        }

        html.push_str(&format!("<div class='content'>{}</div>", post.content));

        if let Some(tags) = &fields.tags {
            html.push_str(&format!(
                "<div class='tags'><strong>Tags:</strong> {}</div>",
                escape_html(tags)
            ));
        }
        html.push_str("</div><hr>");
    }

    html.push_str("</body></html>");
    html
}

/// Render one post as a standalone print document.
pub fn single_html(post: &Post) -> String {
    let fields = derive(post);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><style>");
    html.push_str(STYLE_BLOCK);
    html.push_str("</style></head><body>");

    html.push_str(&format!("<h1>{}</h1>", escape_html(&post.title)));
    html.push_str(&format!(
        "<p class='meta'><strong>By:</strong> {} | <strong>Date:</strong> {}</p>",
        escape_html(&post.author.full_name),
        fields.created_long
    ));

    if let Some(summary) = &fields.summary {
        html.push_str(&format!(
            "<div class='summary'><strong>Summary:</strong> {}</div>",
            escape_html(summary)
        ));
    }

    html.push_str(&format!("<div class='content'>{}</div>", post.content));

    if let Some(tags) = &fields.tags {
        html.push_str(&format!(
            "<div class='tags'><strong>Tags:</strong> {}</div>",
            escape_html(tags)
        ));
    }

    html.push_str("</body></html>");
    html
}
