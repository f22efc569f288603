//! Export facade and format-specific encoders.
//!
//! One module per output format plus the shared tabular row policy:
//!
//! - `xlsx`: styled spreadsheet (ZIP + SpreadsheetML)
//! - `csv`: delimited text table
//! - `docx`: rich-text document (ZIP + WordprocessingML)
//! - `print` + `pdf`: styled HTML converted to a paginated layout
//!
//! The facade functions here own no state: they dispatch to the matching
//! encoder and hand back a finished buffer for the transport boundary,
//! which sets content type, disposition, and length from [`Format`].
//! Every call derives its fields fresh from the posts it is given, so
//! concurrent exports need no coordination, and a failed call returns no
//! bytes at all.

use chrono::Local;

use crate::error::{Error, Result};
use crate::post::{Author, Post};

mod csv;
mod docx;
mod pdf;
mod print;
mod tabular;
mod xlsx;

pub use csv::write_delimited;
pub use docx::DocxExporter;
pub use pdf::{LayoutConverter, PdfConfig, PdfConverter};
pub use print::{collection_html, single_html};
pub use tabular::{DELIMITED_HEADERS, SPREADSHEET_HEADERS};
pub use xlsx::{XlsxConfig, XlsxExporter};

/// The four fixed export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Spreadsheet,
    DelimitedTable,
    RichText,
    Print,
}

impl Format {
    /// Content type the transport should declare for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Format::DelimitedTable => "text/csv",
            Format::RichText => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Format::Print => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Spreadsheet => "xlsx",
            Format::DelimitedTable => "csv",
            Format::RichText => "docx",
            Format::Print => "pdf",
        }
    }

    /// Pick a format from a filename extension.
    pub fn from_extension(ext: &str) -> Result<Format> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(Format::Spreadsheet),
            "csv" => Ok(Format::DelimitedTable),
            "docx" => Ok(Format::RichText),
            "pdf" => Ok(Format::Print),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// Attachment filename for a whole-collection export.
    pub fn collection_filename(&self, username: &str) -> String {
        format!("{username}_posts.{}", self.extension())
    }

    /// Attachment filename for a single-post export.
    pub fn single_filename(&self, post_id: u64) -> String {
        format!("post_{post_id}.{}", self.extension())
    }
}

/// Resolve `post_id` against already-loaded posts.
///
/// Absence is the caller-attributable failure in the taxonomy, distinct
/// from encoder faults.
pub fn find_post(posts: &[Post], post_id: u64) -> Result<&Post> {
    posts
        .iter()
        .find(|p| p.id == post_id)
        .ok_or(Error::PostNotFound(post_id))
}

/// Export `posts` as a styled spreadsheet.
pub fn export_spreadsheet(posts: &[Post]) -> Result<Vec<u8>> {
    XlsxExporter::new().export(posts)
}

/// Export `posts` as a delimited text table.
pub fn export_delimited_table(posts: &[Post]) -> Result<String> {
    Ok(write_delimited(posts))
}

/// Export one post as a rich-text document.
pub fn export_rich_text(posts: &[Post], post_id: u64) -> Result<Vec<u8>> {
    let post = find_post(posts, post_id)?;
    DocxExporter::new().export(post)
}

/// Export `posts` as one flowing print document for `author`.
pub fn export_print_collection(posts: &[Post], author: &Author) -> Result<Vec<u8>> {
    let html = collection_html(posts, author, Local::now().naive_local());
    PdfConverter::new().convert(&html)
}

/// Export one post as a standalone print document.
pub fn export_print_single(posts: &[Post], post_id: u64) -> Result<Vec<u8>> {
    let post = find_post(posts, post_id)?;
    let html = single_html(post);
    PdfConverter::new().convert(&html)
}
