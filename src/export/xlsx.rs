//! Spreadsheet (XLSX) encoder.
//!
//! An XLSX file is a ZIP package of XML parts. This writer emits the
//! minimal set (content types, package rels, workbook, styles, one
//! worksheet) with inline strings so no shared-string table is needed.
//! The header row uses the bold cell format; column widths are fitted
//! from the longest rendered value per column once all rows are built.

use std::io::{Cursor, Seek, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::escape::escape_xml;
use crate::post::Post;

use super::tabular::{Row, SPREADSHEET_HEADERS};

/// Configuration for spreadsheet export.
#[derive(Debug, Clone)]
pub struct XlsxConfig {
    /// Worksheet name shown on the sheet tab.
    pub sheet_name: String,
}

impl Default for XlsxConfig {
    fn default() -> Self {
        XlsxConfig {
            sheet_name: "Blog Posts".to_string(),
        }
    }
}

/// Spreadsheet exporter.
pub struct XlsxExporter {
    config: XlsxConfig,
}

impl XlsxExporter {
    pub fn new() -> Self {
        XlsxExporter {
            config: XlsxConfig::default(),
        }
    }

    pub fn with_config(mut self, config: XlsxConfig) -> Self {
        self.config = config;
        self
    }

    /// Export `posts` as a finished XLSX buffer.
    ///
    /// An empty slice produces a valid header-only workbook.
    pub fn export(&self, posts: &[Post]) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.write(posts, &mut buf)?;
        Ok(buf.into_inner())
    }

    /// Write the XLSX package to any `Write + Seek` destination.
    pub fn write<W: Write + Seek>(&self, posts: &[Post], writer: &mut W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let deflated =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", deflated)?;
        zip.write_all(CONTENT_TYPES.as_bytes())?;

        zip.start_file("_rels/.rels", deflated)?;
        zip.write_all(ROOT_RELS.as_bytes())?;

        zip.start_file("xl/workbook.xml", deflated)?;
        zip.write_all(self.workbook_xml().as_bytes())?;

        zip.start_file("xl/_rels/workbook.xml.rels", deflated)?;
        zip.write_all(WORKBOOK_RELS.as_bytes())?;

        zip.start_file("xl/styles.xml", deflated)?;
        zip.write_all(STYLES_XML.as_bytes())?;

        zip.start_file("xl/worksheets/sheet1.xml", deflated)?;
        zip.write_all(worksheet_xml(posts).as_bytes())?;

        zip.finish()?;
        Ok(())
    }

    fn workbook_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="{}" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>
"#,
            escape_xml(&self.config.sheet_name)
        )
    }
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// One worksheet cell: numbers go in `<v>`, text as an inline string.
enum Cell {
    Number(u64),
    Text(String),
}

impl Cell {
    fn display_width(&self) -> usize {
        match self {
            Cell::Number(n) => n.to_string().chars().count(),
            Cell::Text(t) => t.chars().count(),
        }
    }
}

fn worksheet_xml(posts: &[Post]) -> String {
    // Header row first, then one row per post in input order.
    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(posts.len() + 1);
    rows.push(
        SPREADSHEET_HEADERS
            .iter()
            .map(|h| Cell::Text(h.to_string()))
            .collect(),
    );
    for post in posts {
        let row = Row::from_post(post);
        rows.push(vec![
            Cell::Number(row.id),
            Cell::Text(row.title),
            Cell::Text(row.summary),
            Cell::Text(row.tags),
            Cell::Text(row.published.to_string()),
            Cell::Text(row.created),
            Cell::Number(row.word_count as u64),
        ]);
    }

    // Column fitting happens after every row is known; the widths still
    // have to be serialized ahead of the sheet data.
    let mut widths = [0usize; SPREADSHEET_HEADERS.len()];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.display_width());
        }
    }

    let mut sheet = String::new();
    sheet.push_str(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <cols>
"#,
    );
    for (i, width) in widths.iter().enumerate() {
        // Width is measured in character units; pad slightly and clamp to
        // the format's maximum.
        let fitted = (width + 2).min(255);
        sheet.push_str(&format!(
            "    <col min=\"{col}\" max=\"{col}\" width=\"{fitted}\" customWidth=\"1\"/>\n",
            col = i + 1,
        ));
    }
    sheet.push_str("  </cols>\n  <sheetData>\n");

    for (r, row) in rows.iter().enumerate() {
        let row_num = r + 1;
        let style = if r == 0 { " s=\"1\"" } else { "" };
        sheet.push_str(&format!("    <row r=\"{row_num}\">\n"));
        for (c, cell) in row.iter().enumerate() {
            let cell_ref = format!("{}{}", col_letter(c), row_num);
            match cell {
                Cell::Number(n) => {
                    sheet.push_str(&format!(
                        "      <c r=\"{cell_ref}\"{style}><v>{n}</v></c>\n"
                    ));
                }
                Cell::Text(t) => {
                    sheet.push_str(&format!(
                        "      <c r=\"{cell_ref}\"{style} t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>\n",
                        escape_xml(t)
                    ));
                }
            }
        }
        sheet.push_str("    </row>\n");
    }

    sheet.push_str("  </sheetData>\n</worksheet>\n");
    sheet
}

/// Column index to spreadsheet letter (A..Z; the profile has 7 columns).
fn col_letter(index: usize) -> char {
    debug_assert!(index < 26);
    (b'A' + index as u8) as char
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
  <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
</Types>
"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>
"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>
"#;

/// Font 1 / cell format 1 is the bold header style.
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="2">
    <font><sz val="11"/><name val="Calibri"/></font>
    <font><b/><sz val="11"/><name val="Calibri"/></font>
  </fonts>
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>
  <cellXfs count="2">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>
  </cellXfs>
</styleSheet>
"#;
