//! Format-specific text sanitization.
//!
//! Three escaping rules live here, one per target family:
//!
//! - [`escape_html`] for the print renderer's metadata fields
//! - [`escape_xml`] for text placed inside OOXML package parts
//! - [`csv_field`] for delimited-table fields
//!
//! Both entity escapes run in a single left-to-right pass, so `&` produced
//! by the pass itself is never re-escaped. Neither is idempotent on raw
//! input: escaping already-escaped text escapes the leading `&` again.
//! Callers must escape exactly once.

/// Escape the five HTML-reserved characters as entities.
///
/// `'` becomes the numeric `&#x27;` (the named `&apos;` is not HTML 4).
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for placement inside an XML element or attribute.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Emit one delimited-table text field.
///
/// Non-empty fields are always quoted with embedded quotes doubled, which
/// covers every field containing the delimiter, a quote, or a line break.
/// Empty fields stay bare. Numeric columns bypass this and are written raw
/// by the tabular encoder.
pub fn csv_field(field: &str) -> String {
    if field.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(field.len() + 2);
    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_reserved_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }

    #[test]
    fn xml_variant_uses_apos() {
        assert_eq!(escape_xml("it's"), "it&apos;s");
        assert_eq!(escape_xml("a < b"), "a &lt; b");
    }

    #[test]
    fn single_pass_never_double_escapes_its_own_output() {
        // "&lt;" is produced in one pass; the '&' it starts with is not
        // revisited within that same pass.
        assert_eq!(escape_html("<"), "&lt;");
    }

    #[test]
    fn escaping_twice_is_not_idempotent() {
        let once = escape_html("<");
        let twice = escape_html(&once);
        assert_ne!(once, twice);
        assert_eq!(twice, "&amp;lt;");
    }

    #[test]
    fn csv_quotes_nonempty_and_doubles_quotes() {
        assert_eq!(csv_field("Hello, World"), "\"Hello, World\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(csv_field(""), "");
    }
}
