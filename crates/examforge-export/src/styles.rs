use serde::{Deserialize, Serialize};

/// Typography and page-geometry configuration shared by both exporters.
///
/// The defaults reproduce the institutional exam-paper layout: A4 pages,
/// 40 pt margins, Times body text. Point sizes apply to both encodings
/// (the DOCX writer converts to OOXML half-points itself).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageStyles {
    /// Font for all body text (DOCX font name; the PDF uses built-in Times).
    pub body_font: String,

    /// Decorative font for the wordmark brand line.
    pub brand_font: String,

    /// Uniform page margin in points.
    pub margin_pt: f64,

    /// Body and option text size in points.
    pub body_size: usize,

    /// Emphasized note lines.
    pub note_size: usize,

    /// Plain instruction lines.
    pub instruction_size: usize,

    /// Section banner lines.
    pub banner_size: usize,

    /// Header title lines (column 2).
    pub title_size: usize,

    /// Header metadata rows (column 3) and marks annotations.
    pub meta_size: usize,

    /// Running footer.
    pub footer_size: usize,

    /// Line height as a multiple of the font size.
    pub line_height: f64,
}

impl Default for PageStyles {
    fn default() -> Self {
        Self {
            body_font: "Times New Roman".to_string(),
            brand_font: "Impact".to_string(),
            margin_pt: 40.0,
            body_size: 10,
            note_size: 10,
            instruction_size: 12,
            banner_size: 14,
            title_size: 14,
            meta_size: 9,
            footer_size: 8,
            line_height: 1.4,
        }
    }
}
