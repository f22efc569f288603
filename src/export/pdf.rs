//! Markup-to-paginated-layout conversion.
//!
//! The print renderer produces an HTML document; this module turns it
//! into a fixed-layout PDF. The conversion runs in three stages:
//!
//! 1. **Extract**: parse the HTML and flatten it into a list of styled
//!    text blocks (headings, metadata lines, callouts, body paragraphs,
//!    rules). Entity references decode here, so escaped metadata comes
//!    back out as plain text.
//! 2. **Layout**: greedy-wrap each block against the page's usable width
//!    using per-class advance widths for the built-in Helvetica faces,
//!    breaking onto a new page when the column is full.
//! 3. **Serialize**: write the PDF object graph (catalog, page tree,
//!    fonts, one content stream per page) followed by the xref table
//!    and trailer.
//!
//! Everything is in-memory and deterministic for a given input.

use std::io::Write as _;

use encoding_rs::WINDOWS_1252;
use html5ever::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::{Error, Result};

/// Converts an assembled markup document into a paginated binary layout.
pub trait LayoutConverter {
    fn convert(&self, html: &str) -> Result<Vec<u8>>;
}

/// Page geometry for the PDF converter. Units are points.
#[derive(Debug, Clone, Copy)]
pub struct PdfConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
}

impl Default for PdfConfig {
    /// US Letter with a 54pt (0.75in) margin.
    fn default() -> Self {
        PdfConfig {
            page_width: 612.0,
            page_height: 792.0,
            margin: 54.0,
        }
    }
}

/// PDF implementation of [`LayoutConverter`].
#[derive(Debug, Clone, Default)]
pub struct PdfConverter {
    config: PdfConfig,
}

impl PdfConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: PdfConfig) -> Self {
        self.config = config;
        self
    }
}

impl LayoutConverter for PdfConverter {
    fn convert(&self, html: &str) -> Result<Vec<u8>> {
        let blocks = extract_blocks(html)?;
        let pages = layout(&blocks, &self.config);
        Ok(serialize(&pages, &self.config))
    }
}

// --- Stage 1: block extraction ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Title,
    Heading,
    Meta,
    Summary,
    Body,
    Tags,
    Rule,
}

#[derive(Debug, Clone)]
struct Block {
    kind: BlockKind,
    text: String,
}

fn extract_blocks(html: &str) -> Result<Vec<Block>> {
    let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());

    let body = find_element(&dom.document, "body")
        .ok_or_else(|| Error::Layout("document has no body".to_string()))?;

    let mut blocks = Vec::new();
    walk_container(&body, &mut blocks);
    Ok(blocks)
}

fn walk_container(node: &Handle, blocks: &mut Vec<Block>) {
    for child in node.children.borrow().iter() {
        let NodeData::Element { name, attrs, .. } = &child.data else {
            continue;
        };
        let tag = name.local.as_ref();
        let class = attr_value(attrs, "class");

        match (tag, class.as_deref()) {
            ("h1", _) => push_text_block(child, BlockKind::Title, blocks),
            ("h2", _) => push_text_block(child, BlockKind::Heading, blocks),
            (_, Some("meta")) => push_text_block(child, BlockKind::Meta, blocks),
            (_, Some("summary")) => push_text_block(child, BlockKind::Summary, blocks),
            (_, Some("tags")) => push_text_block(child, BlockKind::Tags, blocks),
            (_, Some("content")) => walk_content(child, blocks),
            ("hr", _) => blocks.push(Block {
                kind: BlockKind::Rule,
                text: String::new(),
            }),
            // Wrapper elements (e.g. the per-post division) descend.
            _ => walk_container(child, blocks),
        }
    }
}

/// Walk a verbatim content block. Block-level children each become one
/// body paragraph; stray inline content between them is gathered up too.
fn walk_content(node: &Handle, blocks: &mut Vec<Block>) {
    let mut inline_run = String::new();
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Element { name, .. } if is_block_element(name.local.as_ref()) => {
                flush_inline(&mut inline_run, blocks);
                if name.local.as_ref() == "hr" {
                    blocks.push(Block {
                        kind: BlockKind::Rule,
                        text: String::new(),
                    });
                } else if has_block_children(child) {
                    walk_content(child, blocks);
                } else {
                    push_text_block(child, BlockKind::Body, blocks);
                }
            }
            _ => {
                collect_text(child, &mut inline_run);
            }
        }
    }
    flush_inline(&mut inline_run, blocks);
}

fn flush_inline(run: &mut String, blocks: &mut Vec<Block>) {
    let text = normalize_whitespace(run);
    if !text.is_empty() {
        blocks.push(Block {
            kind: BlockKind::Body,
            text,
        });
    }
    run.clear();
}

fn push_text_block(node: &Handle, kind: BlockKind, blocks: &mut Vec<Block>) {
    let mut raw = String::new();
    collect_text(node, &mut raw);
    let text = normalize_whitespace(&raw);
    if !text.is_empty() {
        blocks.push(Block { kind, text });
    }
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } => {
            // Stylesheet and script text is not content.
            if matches!(name.local.as_ref(), "style" | "script") {
                return;
            }
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
    }
}

fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "li"
            | "blockquote"
            | "pre"
            | "table"
            | "hr"
    )
}

fn has_block_children(node: &Handle) -> bool {
    node.children.borrow().iter().any(|child| {
        matches!(&child.data, NodeData::Element { name, .. }
            if is_block_element(name.local.as_ref()))
    })
}

fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &node.data {
        if name.local.as_ref() == tag {
            return Some(node.clone());
        }
    }
    for child in node.children.borrow().iter() {
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

fn attr_value(
    attrs: &std::cell::RefCell<Vec<html5ever::Attribute>>,
    name: &str,
) -> Option<String> {
    attrs
        .borrow()
        .iter()
        .find(|a| a.name.local.as_ref() == name)
        .map(|a| a.value.to_string())
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// --- Stage 2: line layout ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
    Oblique,
}

impl Face {
    fn resource(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Oblique => "F3",
        }
    }
}

struct BlockStyle {
    face: Face,
    size: f32,
    space_before: f32,
    space_after: f32,
    color: (f32, f32, f32),
}

fn block_style(kind: BlockKind) -> BlockStyle {
    match kind {
        BlockKind::Title => BlockStyle {
            face: Face::Bold,
            size: 20.0,
            space_before: 0.0,
            space_after: 14.0,
            color: (0.17, 0.24, 0.31),
        },
        BlockKind::Heading => BlockStyle {
            face: Face::Bold,
            size: 16.0,
            space_before: 10.0,
            space_after: 8.0,
            color: (0.20, 0.29, 0.37),
        },
        BlockKind::Meta => BlockStyle {
            face: Face::Regular,
            size: 10.0,
            space_before: 0.0,
            space_after: 10.0,
            color: (0.50, 0.55, 0.55),
        },
        BlockKind::Summary => BlockStyle {
            face: Face::Oblique,
            size: 11.0,
            space_before: 0.0,
            space_after: 10.0,
            color: (0.0, 0.0, 0.0),
        },
        BlockKind::Body => BlockStyle {
            face: Face::Regular,
            size: 11.0,
            space_before: 0.0,
            space_after: 8.0,
            color: (0.0, 0.0, 0.0),
        },
        BlockKind::Tags => BlockStyle {
            face: Face::Oblique,
            size: 10.0,
            space_before: 0.0,
            space_after: 8.0,
            color: (0.0, 0.0, 0.0),
        },
        BlockKind::Rule => BlockStyle {
            face: Face::Regular,
            size: 0.0,
            space_before: 6.0,
            space_after: 14.0,
            color: (0.74, 0.76, 0.78),
        },
    }
}

struct TextLine {
    x: f32,
    y: f32,
    face: Face,
    size: f32,
    color: (f32, f32, f32),
    text: String,
}

struct RuleLine {
    y: f32,
    color: (f32, f32, f32),
}

#[derive(Default)]
struct Page {
    lines: Vec<TextLine>,
    rules: Vec<RuleLine>,
}

/// Approximate advance width of `c` at size 1.0 in the Helvetica faces.
fn char_advance(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | '\'' | '|' | '!' | ';' | ':' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | ' ' => 0.35,
        'm' | 'w' | 'M' | 'W' | '@' => 0.85,
        c if c.is_ascii_uppercase() => 0.67,
        c if c.is_ascii_digit() => 0.56,
        _ => 0.52,
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(char_advance).sum::<f32>() * size
}

fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn layout(blocks: &[Block], config: &PdfConfig) -> Vec<Page> {
    let usable_width = config.page_width - 2.0 * config.margin;
    let bottom = config.margin;
    let mut pages = vec![Page::default()];
    // `cursor` is the y coordinate of the next baseline, counted from the
    // bottom-left origin the format uses.
    let mut cursor = config.page_height - config.margin;

    for block in blocks {
        let style = block_style(block.kind);
        cursor -= style.space_before;

        if block.kind == BlockKind::Rule {
            if cursor < bottom {
                pages.push(Page::default());
                cursor = config.page_height - config.margin;
            }
            pages.last_mut().unwrap().rules.push(RuleLine {
                y: cursor,
                color: style.color,
            });
            cursor -= style.space_after;
            continue;
        }

        let leading = style.size * 1.35;
        for line in wrap(&block.text, style.size, usable_width) {
            cursor -= leading;
            if cursor < bottom {
                pages.push(Page::default());
                cursor = config.page_height - config.margin - leading;
            }
            pages.last_mut().unwrap().lines.push(TextLine {
                x: config.margin,
                y: cursor,
                face: style.face,
                size: style.size,
                color: style.color,
                text: line,
            });
        }
        cursor -= style.space_after;
    }

    pages
}

// --- Stage 3: PDF serialization ---

/// Incrementally built PDF file: objects are appended with their byte
/// offsets recorded for the xref table.
struct PdfBuilder {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfBuilder {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n");
        // Binary marker comment so transports treat the file as binary.
        buf.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");
        PdfBuilder {
            buf,
            offsets: Vec::new(),
        }
    }

    fn begin_object(&mut self, id: usize) {
        debug_assert_eq!(id, self.offsets.len() + 1);
        self.offsets.push(self.buf.len());
        let _ = write!(self.buf, "{id} 0 obj\n");
    }

    fn end_object(&mut self) {
        self.buf.extend_from_slice(b"endobj\n");
    }

    fn dict_object(&mut self, id: usize, body: &str) {
        self.begin_object(id);
        let _ = writeln!(self.buf, "{body}");
        self.end_object();
    }

    fn stream_object(&mut self, id: usize, stream: &[u8]) {
        self.begin_object(id);
        let _ = write!(self.buf, "<< /Length {} >>\nstream\n", stream.len());
        self.buf.extend_from_slice(stream);
        self.buf.extend_from_slice(b"\nendstream\n");
        self.end_object();
    }

    fn finish(mut self, root_id: usize) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let count = self.offsets.len() + 1;
        let _ = write!(self.buf, "xref\n0 {count}\n");
        self.buf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = write!(self.buf, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            self.buf,
            "trailer\n<< /Size {count} /Root {root_id} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );
        self.buf
    }
}

fn serialize(pages: &[Page], config: &PdfConfig) -> Vec<u8> {
    // Object layout: 1 catalog, 2 page tree, 3-5 fonts, then a page and
    // content stream pair per page.
    const FIRST_PAGE_ID: usize = 6;
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_ID + 2 * i))
        .collect();

    let mut pdf = PdfBuilder::new();
    pdf.dict_object(1, "<< /Type /Catalog /Pages 2 0 R >>");
    pdf.dict_object(
        2,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        ),
    );
    pdf.dict_object(
        3,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    pdf.dict_object(
        4,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );
    pdf.dict_object(
        5,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Oblique /Encoding /WinAnsiEncoding >>",
    );

    for (i, page) in pages.iter().enumerate() {
        let page_id = FIRST_PAGE_ID + 2 * i;
        let content_id = page_id + 1;
        pdf.dict_object(
            page_id,
            &format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R /F3 5 0 R >> >> \
                 /Contents {content_id} 0 R >>",
                config.page_width, config.page_height
            ),
        );
        pdf.stream_object(content_id, &content_stream(page, config));
    }

    pdf.finish(1)
}

fn content_stream(page: &Page, config: &PdfConfig) -> Vec<u8> {
    let mut stream = Vec::new();
    for line in &page.lines {
        let (r, g, b) = line.color;
        let _ = write!(
            stream,
            "BT /{} {} Tf {r:.2} {g:.2} {b:.2} rg {:.2} {:.2} Td (",
            line.face.resource(),
            line.size,
            line.x,
            line.y
        );
        stream.extend_from_slice(&pdf_string_bytes(&line.text));
        stream.extend_from_slice(b") Tj ET\n");
    }
    for rule in &page.rules {
        let (r, g, b) = rule.color;
        let _ = write!(
            stream,
            "q {r:.2} {g:.2} {b:.2} RG 1.5 w {:.2} {y:.2} m {:.2} {y:.2} l S Q\n",
            config.margin,
            config.page_width - config.margin,
            y = rule.y
        );
    }
    stream
}

/// Encode text onto the WinAnsi code page and escape the string
/// delimiters. Code points outside the page degrade to `?`.
fn pdf_string_bytes(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let byte = if c.is_ascii() {
            c as u8
        } else {
            let mut buf = [0u8; 4];
            let (encoded, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
            if had_errors || encoded.len() != 1 {
                b'?'
            } else {
                encoded[0]
            }
        };
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out
}
