//! # postpress
//!
//! A multi-format export library for blog content.
//!
//! ## Features
//!
//! - Styled spreadsheet (XLSX) and delimited-table (CSV) exports, one row
//!   per post with derived word/character counts
//! - Rich-text (DOCX) export of a single post as styled paragraphs
//! - Print (PDF) export of one or many posts via an intermediate styled
//!   HTML document and a built-in paginated layout converter
//!
//! Every export is stateless and all-or-nothing: derived fields are
//! recomputed per call from the posts passed in, and a failing call
//! returns an error instead of a partial buffer. Authentication, post
//! loading, and HTTP framing belong to the caller; [`export::Format`]
//! carries the content type and attachment filename the transport needs.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use postpress::{Author, Post, export_spreadsheet};
//!
//! let created = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(10, 30, 0)
//!     .unwrap();
//! let post = Post {
//!     id: 1,
//!     title: "Hello, World".to_string(),
//!     content: "<p>Hi <b>there</b></p>".to_string(),
//!     summary: None,
//!     tags: None,
//!     published: true,
//!     author: Author {
//!         id: 1,
//!         username: "jdoe".to_string(),
//!         full_name: "Jane Doe".to_string(),
//!     },
//!     created_at: created,
//!     updated_at: created,
//! };
//!
//! let xlsx = export_spreadsheet(std::slice::from_ref(&post))?;
//! assert!(!xlsx.is_empty());
//! # Ok::<(), postpress::Error>(())
//! ```

pub mod derive;
pub mod error;
pub mod escape;
pub mod export;
pub mod post;

pub use derive::{DerivedFields, derive};
pub use error::{Error, Result};
pub use export::{
    Format, export_delimited_table, export_print_collection, export_print_single,
    export_rich_text, export_spreadsheet,
};
pub use post::{Author, Post};
