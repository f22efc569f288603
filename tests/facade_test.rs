use chrono::NaiveDate;

use postpress::export::{Format, export_print_collection, find_post};
use postpress::{Author, Error, Post};

fn post(id: u64) -> Post {
    let at = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    Post {
        id,
        title: format!("Post {id}"),
        content: "<p>Body</p>".to_string(),
        summary: None,
        tags: None,
        published: true,
        author: Author {
            id: 7,
            username: "jdoe".to_string(),
            full_name: "Jane Doe".to_string(),
        },
        created_at: at,
        updated_at: at,
    }
}

#[test]
fn content_types_are_fixed() {
    assert_eq!(
        Format::Spreadsheet.content_type(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(Format::DelimitedTable.content_type(), "text/csv");
    assert_eq!(
        Format::RichText.content_type(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!(Format::Print.content_type(), "application/pdf");
}

#[test]
fn attachment_filenames_follow_patterns() {
    assert_eq!(
        Format::Spreadsheet.collection_filename("jdoe"),
        "jdoe_posts.xlsx"
    );
    assert_eq!(
        Format::DelimitedTable.collection_filename("jdoe"),
        "jdoe_posts.csv"
    );
    assert_eq!(Format::Print.collection_filename("jdoe"), "jdoe_posts.pdf");
    assert_eq!(Format::RichText.single_filename(3), "post_3.docx");
    assert_eq!(Format::Print.single_filename(3), "post_3.pdf");
}

#[test]
fn formats_resolve_from_extensions() {
    assert_eq!(Format::from_extension("XLSX").unwrap(), Format::Spreadsheet);
    assert_eq!(Format::from_extension("csv").unwrap(), Format::DelimitedTable);
    assert_eq!(Format::from_extension("docx").unwrap(), Format::RichText);
    assert_eq!(Format::from_extension("pdf").unwrap(), Format::Print);
    assert!(matches!(
        Format::from_extension("txt"),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn find_post_distinguishes_absence_from_other_failures() {
    let posts = vec![post(1), post(2)];
    assert_eq!(find_post(&posts, 2).unwrap().id, 2);

    let err = find_post(&posts, 3).unwrap_err();
    assert!(matches!(err, Error::PostNotFound(3)));
    assert_eq!(err.to_string(), "post not found: 3");
}

#[test]
fn print_collection_succeeds_for_an_empty_slice() {
    // Header-only document: collection title and generation stamp.
    let author = Author {
        id: 7,
        username: "jdoe".to_string(),
        full_name: "Jane Doe".to_string(),
    };
    let bytes = export_print_collection(&[], &author).expect("export failed");
    assert!(bytes.starts_with(b"%PDF-1.4"));
}
