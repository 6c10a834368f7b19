//! Export entry points.
//!
//! Both renderers consume the same composed layout, so a paper exported to
//! PDF and to DOCX shows the same titles, numbering, and option grids. The
//! paginated path is synchronous and does no I/O; the structured path may
//! fetch the logo through an injected [`LogoFetcher`].

use tracing::warn;

use examforge_core::clock::Clock;
use examforge_core::layout::{self, PaperLayout};
use examforge_core::models::draft::PaperDraft;

use crate::docx;
use crate::error::ExportError;
use crate::fetch::LogoFetcher;
use crate::logo::LogoImage;
use crate::pdf;
use crate::styles::PageStyles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

/// Per-export knobs. `logo` carries pre-fetched image bytes for callers that
/// already hold them; when absent, the paginated renderer falls back to the
/// wordmark and the structured renderer fetches.
#[derive(Default)]
pub struct RenderOptions {
    pub logo: Option<Vec<u8>>,
    pub styles: PageStyles,
}

/// Render a draft to a paginated PDF.
pub fn render_paginated(draft: &PaperDraft, clock: &impl Clock) -> Result<Vec<u8>, ExportError> {
    render_paginated_with(draft, clock, RenderOptions::default())
}

pub fn render_paginated_with(
    draft: &PaperDraft,
    clock: &impl Clock,
    options: RenderOptions,
) -> Result<Vec<u8>, ExportError> {
    let today = clock.today();
    let paper = layout::compose(draft, today);
    let logo = options.logo.and_then(LogoImage::decode);
    pdf::render(&paper, &options.styles, logo.as_ref(), today)
}

/// Render a draft to a structured DOCX, fetching the logo if the paper names
/// one.
pub async fn render_structured(
    draft: &PaperDraft,
    fetcher: &impl LogoFetcher,
    clock: &impl Clock,
) -> Result<Vec<u8>, ExportError> {
    render_structured_with(draft, fetcher, clock, RenderOptions::default()).await
}

pub async fn render_structured_with(
    draft: &PaperDraft,
    fetcher: &impl LogoFetcher,
    clock: &impl Clock,
    options: RenderOptions,
) -> Result<Vec<u8>, ExportError> {
    let paper = layout::compose(draft, clock.today());
    let logo = resolve_logo(&paper, fetcher, options.logo).await;
    docx::render(&paper, &options.styles, logo.as_ref())
}

/// Logo resolution never fails an export; every failure path downgrades to
/// the wordmark.
async fn resolve_logo(
    paper: &PaperLayout,
    fetcher: &impl LogoFetcher,
    provided: Option<Vec<u8>>,
) -> Option<LogoImage> {
    if let Some(bytes) = provided {
        return LogoImage::decode(bytes);
    }
    let url = paper.header.logo_url.as_deref()?;
    match fetcher.fetch(url).await {
        Ok(bytes) => LogoImage::decode(bytes),
        Err(e) => {
            warn!(url, error = %e, "logo fetch failed, falling back to wordmark");
            None
        }
    }
}

/// Download filename for an export, derived from the paper title.
pub fn suggested_filename(draft: &PaperDraft, format: ExportFormat) -> String {
    format!("{}.{}", draft.config.file_stem(), format.extension())
}
