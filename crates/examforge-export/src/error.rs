use thiserror::Error;

/// Render-pipeline failures. These are fatal to the render call that raised
/// them; no partial artifact is produced. Logo-fetch problems are *not*
/// errors; they downgrade to the wordmark inside the renderer.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("DOCX generation failed: {0}")]
    Docx(String),
}
