use std::io::{Cursor, Read};

use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::Reader;
use quick_xml::events::Event;
use tempfile::NamedTempFile;
use zip::ZipArchive;

use postpress::export::{
    DELIMITED_HEADERS, SPREADSHEET_HEADERS, XlsxExporter, export_delimited_table,
    export_spreadsheet,
};
use postpress::{Author, Post};

fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn author() -> Author {
    Author {
        id: 7,
        username: "jdoe".to_string(),
        full_name: "Jane Doe".to_string(),
    }
}

fn post(id: u64, title: &str, content: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        content: content.to_string(),
        summary: None,
        tags: None,
        published: true,
        author: author(),
        created_at: timestamp(2024, 1, 15, 10, 30),
        updated_at: timestamp(2024, 1, 15, 10, 30),
    }
}

/// Minimal parser for standard delimited-text quoting rules.
fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

#[test]
fn delimited_header_row_is_exact() {
    let csv = export_delimited_table(&[]).expect("export failed");
    assert_eq!(
        csv.lines().next().unwrap(),
        "\"ID\",\"Title\",\"Summary\",\"Tags\",\"Published\",\"Created Date\",\"Updated Date\",\"Word Count\",\"Character Count\""
    );
    let parsed = parse_csv(&csv);
    assert_eq!(parsed[0], DELIMITED_HEADERS);
}

#[test]
fn delimited_row_matches_known_post() {
    let posts = vec![post(1, "Hello, World", "<p>Hi <b>there</b></p>")];
    let csv = export_delimited_table(&posts).expect("export failed");
    let row = csv.lines().nth(1).unwrap();
    assert_eq!(
        row,
        "1,\"Hello, World\",,,\"Yes\",\"2024-01-15 10:30\",\"2024-01-15 10:30\",2,8"
    );
}

#[test]
fn delimited_round_trips_awkward_fields() {
    let mut tricky = post(42, "He said \"hi\", twice", "<p>Body text here</p>");
    tricky.summary = Some("Line one\nline two".to_string());
    tricky.tags = Some("rust,\"quoted\"".to_string());
    tricky.published = false;

    let csv = export_delimited_table(std::slice::from_ref(&tricky)).expect("export failed");
    let parsed = parse_csv(&csv);
    assert_eq!(parsed.len(), 2);

    let row = &parsed[1];
    assert_eq!(row[0], "42");
    assert_eq!(row[1], "He said \"hi\", twice");
    assert_eq!(row[2], "Line one\nline two");
    assert_eq!(row[3], "rust,\"quoted\"");
    assert_eq!(row[4], "No");
}

#[test]
fn delimited_empty_list_is_header_only() {
    let csv = export_delimited_table(&[]).expect("export failed");
    assert_eq!(csv.lines().count(), 1);
}

/// Pull `(style_flag, value)` per cell out of a worksheet part, row by row.
fn sheet_rows(xml: &str) -> Vec<Vec<(bool, String)>> {
    let mut reader = Reader::from_str(xml);
    let mut rows: Vec<Vec<(bool, String)>> = Vec::new();
    let mut styled = false;
    let mut capture = false;
    loop {
        match reader.read_event().expect("bad xml") {
            Event::Start(e) if e.name().as_ref() == b"row" => rows.push(Vec::new()),
            Event::Start(e) if e.name().as_ref() == b"c" => {
                styled = e
                    .attributes()
                    .filter_map(|a| a.ok())
                    .any(|a| a.key.as_ref() == b"s" && a.value.as_ref() == b"1");
            }
            Event::Start(e) if matches!(e.name().as_ref(), b"v" | b"t") => capture = true,
            Event::Text(e) if capture => {
                let value = e.unescape().expect("bad text").into_owned();
                rows.last_mut().unwrap().push((styled, value));
                capture = false;
            }
            // A value element with no text event is an empty cell.
            Event::End(e) if capture && matches!(e.name().as_ref(), b"v" | b"t") => {
                rows.last_mut().unwrap().push((styled, String::new()));
                capture = false;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    rows
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("not a zip");
    let mut part = archive.by_name(name).expect("missing part");
    let mut content = String::new();
    part.read_to_string(&mut content).expect("unreadable part");
    content
}

#[test]
fn spreadsheet_package_has_required_parts() {
    let bytes = export_spreadsheet(&[post(1, "T", "c")]).expect("export failed");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("not a zip");
    for name in [
        "[Content_Types].xml",
        "_rels/.rels",
        "xl/workbook.xml",
        "xl/_rels/workbook.xml.rels",
        "xl/styles.xml",
        "xl/worksheets/sheet1.xml",
    ] {
        archive.by_name(name).expect("missing part");
    }
}

#[test]
fn spreadsheet_header_row_is_exact_and_bold() {
    let bytes = export_spreadsheet(&[post(1, "T", "c")]).expect("export failed");
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    let rows = sheet_rows(&sheet);

    let header: Vec<&str> = rows[0].iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(header, SPREADSHEET_HEADERS);
    assert!(rows[0].iter().all(|(styled, _)| *styled));
    assert!(rows[1].iter().all(|(styled, _)| !*styled));
}

#[test]
fn spreadsheet_row_values_follow_row_policy() {
    let mut p = post(9, "Title & Co", "<p>one two three</p>");
    p.tags = Some("a,b".to_string());
    p.published = false;

    let bytes = export_spreadsheet(std::slice::from_ref(&p)).expect("export failed");
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    let rows = sheet_rows(&sheet);

    let values: Vec<&str> = rows[1].iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(
        values,
        vec!["9", "Title & Co", "", "a,b", "No", "2024-01-15 10:30", "3"]
    );
}

#[test]
fn spreadsheet_empty_list_is_header_only() {
    let bytes = export_spreadsheet(&[]).expect("export failed");
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    let rows = sheet_rows(&sheet);
    assert_eq!(rows.len(), 1);
}

#[test]
fn spreadsheet_fits_columns_to_content() {
    let long_title = "An unusually long title that dominates its column";
    let bytes = export_spreadsheet(&[post(1, long_title, "c")]).expect("export failed");
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

    // Column 2 width tracks the longest value (title + padding).
    let expected = format!(
        "<col min=\"2\" max=\"2\" width=\"{}\" customWidth=\"1\"/>",
        long_title.chars().count() + 2
    );
    assert!(sheet.contains(&expected), "sheet was: {sheet}");
    // Columns come before the sheet data.
    assert!(sheet.find("<cols>").unwrap() < sheet.find("<sheetData>").unwrap());
}

#[test]
fn spreadsheet_writes_to_file_destinations() {
    let file = NamedTempFile::new().expect("temp file");
    let mut handle = file.reopen().expect("reopen");
    XlsxExporter::new()
        .write(&[post(1, "T", "c")], &mut handle)
        .expect("write failed");

    let bytes = std::fs::read(file.path()).expect("read back");
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("sheetData"));
}
