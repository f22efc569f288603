//! Rich-text (DOCX) encoder.
//!
//! A DOCX file is a ZIP package whose main part is a WordprocessingML
//! document: a flat sequence of paragraphs, each holding styled runs.
//! One post becomes, in order: bold title, italic byline, a spacer,
//! an optional italic summary (plus spacer), the tag-stripped body, and
//! an optional italic tag line preceded by a spacer. Omitted sections
//! leave no placeholder paragraph behind.

use std::io::{Cursor, Seek, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::derive::derive;
use crate::error::Result;
use crate::escape::escape_xml;
use crate::post::Post;

/// Rich-text exporter for a single post.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter;

impl DocxExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export `post` as a finished DOCX buffer.
    pub fn export(&self, post: &Post) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.write(post, &mut buf)?;
        Ok(buf.into_inner())
    }

    /// Write the DOCX package to any `Write + Seek` destination.
    pub fn write<W: Write + Seek>(&self, post: &Post, writer: &mut W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let deflated =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", deflated)?;
        zip.write_all(CONTENT_TYPES.as_bytes())?;

        zip.start_file("_rels/.rels", deflated)?;
        zip.write_all(ROOT_RELS.as_bytes())?;

        zip.start_file("word/document.xml", deflated)?;
        zip.write_all(document_xml(post).as_bytes())?;

        zip.finish()?;
        Ok(())
    }
}

/// Run styling; sizes are in half-points per the format.
#[derive(Clone, Copy, Default)]
struct RunStyle {
    bold: bool,
    italic: bool,
    size: Option<u32>,
}

fn document_xml(post: &Post) -> String {
    let fields = derive(post);

    let mut body = String::new();

    // Title: bold, 18pt.
    push_paragraph(
        &mut body,
        &post.title,
        RunStyle {
            bold: true,
            size: Some(36),
            ..Default::default()
        },
    );

    // Byline: italic.
    let byline = format!("By {}, {}", post.author.full_name, fields.created_long);
    push_paragraph(
        &mut body,
        &byline,
        RunStyle {
            italic: true,
            ..Default::default()
        },
    );

    push_spacer(&mut body);

    if let Some(summary) = &fields.summary {
        push_paragraph(
            &mut body,
            &format!("Summary: {summary}"),
            RunStyle {
                italic: true,
                ..Default::default()
            },
        );
        push_spacer(&mut body);
    }

    // Body: markup stripped, plain run. The rich-text target has no
    // markup concept, so the text goes in as-is (XML framing aside).
    push_paragraph(&mut body, &fields.clean_text, RunStyle::default());

    if let Some(tags) = &fields.tags {
        push_spacer(&mut body);
        push_paragraph(
            &mut body,
            &format!("Tags: {tags}"),
            RunStyle {
                italic: true,
                ..Default::default()
            },
        );
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
{body}  </w:body>
</w:document>
"#
    )
}

fn push_paragraph(out: &mut String, text: &str, style: RunStyle) {
    out.push_str("    <w:p><w:r>");
    if style.bold || style.italic || style.size.is_some() {
        out.push_str("<w:rPr>");
        if style.bold {
            out.push_str("<w:b/>");
        }
        if style.italic {
            out.push_str("<w:i/>");
        }
        if let Some(size) = style.size {
            out.push_str(&format!("<w:sz w:val=\"{size}\"/>"));
        }
        out.push_str("</w:rPr>");
    }
    out.push_str(&format!(
        "<w:t xml:space=\"preserve\">{}</w:t>",
        escape_xml(text)
    ));
    out.push_str("</w:r></w:p>\n");
}

fn push_spacer(out: &mut String) {
    out.push_str("    <w:p/>\n");
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>
"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>
"#;
