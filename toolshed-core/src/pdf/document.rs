//! Dummy report layout: a cover page with a table of contents, one page per
//! section, then any number of filler pages.

use anyhow::Result;
use lopdf::{
    Dictionary, Document, Object, ObjectId, Stream,
    content::{Content, Operation},
    dictionary,
};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 72.0;
const FOOTER_Y: f32 = 30.0;

const BODY_SIZE: f32 = 10.0;
/// Courier glyphs are 0.6 em wide.
const COURIER_ADVANCE: f32 = 0.6;
const BODY_COLUMNS: usize = 75;
const LINE_SPACING: f32 = 1.3;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";
const ITALIC: &str = "F3";

const SECTIONS: [&str; 5] = [
    "Introduction",
    "Methodology",
    "Results and Discussion",
    "Conclusion",
    "References",
];

const REFERENCES: [&str; 3] = [
    "Smith, J. (2021). Study on dummy data. Journal of Tests, 12(3), 45-67.",
    "Doe, A., & Roe, R. (2020). Generating large PDFs. Data Science Journal, 8(1), 12-19.",
    "Johnson, K. (2019). Dummy content methods. Computing Reports, 5(2), 78-83.",
];

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
const SECTION_PARAGRAPHS: usize = 3;
const FILLER_PARAGRAPHS: usize = 5;

fn lorem_paragraph() -> String {
    LOREM.repeat(10).trim_end().to_string()
}

/// Greedy word wrap at `columns` characters.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[allow(clippy::cast_precision_loss)]
fn text_width(text: &str, size: f32) -> f32 {
    text.len() as f32 * size * COURIER_ADVANCE
}

/// Content stream of one page, written top to bottom.
struct PageWriter {
    operations: Vec<Operation>,
    cursor: f32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            operations: Vec::new(),
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn text_at(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn line(&mut self, font: &str, size: f32, text: &str) {
        self.text_at(font, size, MARGIN, self.cursor, text);
        self.cursor -= size * LINE_SPACING;
    }

    fn centered(&mut self, font: &str, size: f32, text: &str) {
        let x = (PAGE_WIDTH - text_width(text, size)) / 2.0;
        self.text_at(font, size, x, self.cursor, text);
        self.cursor -= size * LINE_SPACING;
    }

    fn gap(&mut self, amount: f32) {
        self.cursor -= amount;
    }

    fn paragraph(&mut self, text: &str) {
        for line in wrap(text, BODY_COLUMNS) {
            self.line(REGULAR, BODY_SIZE, &line);
        }
        self.gap(BODY_SIZE);
    }

    fn finish(mut self, page_number: usize) -> Content {
        let footer = format!("Page {page_number}");
        let x = (PAGE_WIDTH - text_width(&footer, BODY_SIZE)) / 2.0;
        self.text_at(ITALIC, BODY_SIZE, x, FOOTER_Y, &footer);
        Content {
            operations: self.operations,
        }
    }
}

fn cover_page() -> PageWriter {
    let mut page = PageWriter::new();
    page.centered(BOLD, 20.0, "Dummy Report");
    page.gap(10.0);
    page.centered(REGULAR, 14.0, "Generated for testing large PDF files");
    page.gap(20.0);
    page.line(BOLD, 16.0, "Table of Contents");
    for (i, section) in SECTIONS.iter().enumerate() {
        let number = i + 1;
        page.line(
            REGULAR,
            12.0,
            &format!("{number}. {section} .......................... {}", number + 1),
        );
    }
    page
}

fn section_page(section: &str) -> PageWriter {
    let mut page = PageWriter::new();
    page.line(BOLD, 16.0, section);
    page.gap(5.0);
    if section == "References" {
        for reference in REFERENCES {
            page.paragraph(reference);
        }
    } else {
        let text = lorem_paragraph();
        for _ in 0..SECTION_PARAGRAPHS {
            page.paragraph(&text);
        }
    }
    page
}

fn filler_page(text: &str) -> PageWriter {
    let mut page = PageWriter::new();
    for _ in 0..FILLER_PARAGRAPHS {
        page.paragraph(text);
    }
    page
}

fn font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
    }
}

/// Number of pages before any filler: cover plus one per section.
pub const BASE_PAGES: usize = 1 + SECTIONS.len();

/// Serialise the report with `filler_pages` extra pages, uncompressed.
pub fn render(filler_pages: usize) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let fonts = dictionary! {
        REGULAR => doc.add_object(font("Courier")),
        BOLD => doc.add_object(font("Courier-Bold")),
        ITALIC => doc.add_object(font("Courier-Oblique")),
    };
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let filler_text = lorem_paragraph();
    let pages = std::iter::once(cover_page())
        .chain(SECTIONS.iter().map(|section| section_page(section)))
        .chain((0..filler_pages).map(|_| filler_page(&filler_text)));

    let mut kids: Vec<Object> = Vec::with_capacity(BASE_PAGES + filler_pages);
    for (i, page) in pages.enumerate() {
        let content = page.finish(i + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = i64::try_from(kids.len())?;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            PAGE_WIDTH.into(),
            PAGE_HEIGHT.into(),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
