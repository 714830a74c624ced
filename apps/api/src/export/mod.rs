//! PDF export of an `ImprovedCv`.
//!
//! `layout` positions text on an A4 page using static Helvetica metrics,
//! `pdf` serializes the result. Rendering is CPU-bound; callers run
//! `render_cv_pdf` inside `tokio::task::spawn_blocking`.

pub mod font_metrics;
pub mod layout;
pub mod pdf;

use crate::models::ImprovedCv;

pub use layout::PageGeometry;
pub use pdf::ExportError;

/// Suggested download name for exported CVs.
pub const EXPORT_FILENAME: &str = "improved_cv.pdf";

/// Renders `cv` to a single-page A4 PDF.
pub fn render_cv_pdf(cv: &ImprovedCv) -> Result<Vec<u8>, ExportError> {
    let page = layout::layout_cv(cv, PageGeometry::a4());
    pdf::write_pdf(&page, cv.header.full_name.trim())
}
