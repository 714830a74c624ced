//! Single-page PDF 1.4 output for a `LaidOutPage`, built with `lopdf`.
//!
//! Uses the base-14 Helvetica faces with WinAnsiEncoding, so no font data is
//! embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;

use crate::export::font_metrics::{win_ansi_byte, FontStyle};
use crate::export::layout::LaidOutPage;

const PDF_VERSION: &str = "1.4";
const PRODUCER: &str = "cvcoach";
const FONT_STYLES: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Oblique];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode page content: {0}")]
    Encode(String),

    #[error("failed to serialize PDF: {0}")]
    Write(String),
}

/// Serializes `page` into a complete PDF document.
///
/// When the content is taller than the page, the whole drawing is scaled
/// uniformly to the page height and centered horizontally.
pub fn write_pdf(page: &LaidOutPage, title: &str) -> Result<Vec<u8>, ExportError> {
    let geometry = page.geometry;
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for style in FONT_STYLES {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => style.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(style.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let content = Content {
        operations: page_operations(page),
    };
    let encoded = content
        .encode()
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        geometry.width_pt.into(),
        geometry.height_pt.into(),
    ];
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box,
        "Resources" => resources_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(title),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| ExportError::Write(e.to_string()))?;
    Ok(out)
}

/// Rules and text runs inside a transform that flips the y axis and applies
/// the fit-to-page scale.
fn page_operations(page: &LaidOutPage) -> Vec<Operation> {
    let geometry = page.geometry;
    let scale = page.scale_to_fit();
    let x_offset = (geometry.width_pt - geometry.width_pt * scale) / 2.0;

    let mut ops = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                scale.into(),
                0.into(),
                0.into(),
                scale.into(),
                x_offset.into(),
                geometry.height_pt.into(),
            ],
        ),
    ];

    for rule in &page.rules {
        ops.extend([
            Operation::new("G", vec![rule.gray.into()]),
            Operation::new("w", vec![rule.thickness.into()]),
            Operation::new("m", vec![rule.x_start.into(), (-rule.y).into()]),
            Operation::new("l", vec![rule.x_end.into(), (-rule.y).into()]),
            Operation::new("S", vec![]),
        ]);
    }

    for run in &page.runs {
        ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("g", vec![run.gray.into()]),
            Operation::new(
                "Tf",
                vec![run.style.resource_name().into(), run.size_pt.into()],
            ),
            Operation::new(
                "Tm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    run.x.into(),
                    (-run.baseline).into(),
                ],
            ),
            Operation::new("Tj", vec![text_string(&run.text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    ops.push(Operation::new("Q", vec![]));
    ops
}

/// A literal string in WinAnsiEncoding; unsupported characters become `?`.
fn text_string(text: &str) -> Object {
    Object::String(text.chars().map(win_ansi_byte).collect(), StringFormat::Literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::layout::{layout_cv, PageGeometry};
    use crate::models::improved_cv::{CvHeader, ExperienceEntry, ImprovedCv};

    fn cv(entries: usize) -> ImprovedCv {
        ImprovedCv {
            header: CvHeader {
                full_name: "Jane (JD) Doe".into(),
                email: "jane@example.com".into(),
                ..Default::default()
            },
            summary: "Café owner turned engineer.".into(),
            experience: (0..entries)
                .map(|i| ExperienceEntry {
                    title: format!("Engineer {i}"),
                    company: "Acme".into(),
                    bullets: vec!["Shipped features across the platform.".into(); 3],
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn render(entries: usize) -> (LaidOutPage, Vec<u8>) {
        let page = layout_cv(&cv(entries), PageGeometry::a4());
        let bytes = write_pdf(&page, "Jane Doe").unwrap();
        (page, bytes)
    }

    fn page_content(bytes: &[u8]) -> Content {
        let doc = Document::load_mem(bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page_id = *pages.values().next().unwrap();
        Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap()
    }

    fn operands(content: &Content, operator: &str) -> Vec<f32> {
        content
            .operations
            .iter()
            .find(|op| op.operator == operator)
            .unwrap()
            .operands
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect()
    }

    #[test]
    fn test_text_string_encodes_win_ansi() {
        assert_eq!(
            text_string("Café •"),
            Object::String(b"Caf\xE9 \x95".to_vec(), StringFormat::Literal)
        );
        assert_eq!(
            text_string("日本"),
            Object::String(b"??".to_vec(), StringFormat::Literal)
        );
    }

    #[test]
    fn test_document_loads_as_single_a4_page() {
        let (_, bytes) = render(1);
        assert!(bytes.starts_with(b"%PDF-1.4"));

        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let media_box: Vec<f32> = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect();
        assert_eq!(media_box.len(), 4);
        assert!((media_box[2] - 595.28).abs() < 0.01);
        assert!((media_box[3] - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_runs_are_drawn_with_escaped_text() {
        let (_, bytes) = render(1);
        let content = page_content(&bytes);
        let shown: Vec<Vec<u8>> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .map(|op| op.operands[0].as_str().unwrap().to_vec())
            .collect();
        assert!(shown.contains(&b"Jane (JD) Doe".to_vec()));
        assert!(shown.contains(&b"Caf\xE9 owner turned engineer.".to_vec()));
    }

    #[test]
    fn test_short_content_is_not_scaled() {
        let (page, bytes) = render(1);
        let cm = operands(&page_content(&bytes), "cm");
        assert_eq!(cm[..5], [1.0, 0.0, 0.0, 1.0, 0.0]);
        assert!((cm[5] - page.geometry.height_pt).abs() < 0.01);
    }

    #[test]
    fn test_tall_content_is_scaled_and_centered() {
        let (page, bytes) = render(40);
        let scale = page.scale_to_fit();
        assert!(scale < 1.0);

        let cm = operands(&page_content(&bytes), "cm");
        let expected_offset = (page.geometry.width_pt - page.geometry.width_pt * scale) / 2.0;
        assert!((cm[0] - scale).abs() < 1e-4);
        assert!((cm[3] - scale).abs() < 1e-4);
        assert!((cm[4] - expected_offset).abs() < 0.01);
    }
}
