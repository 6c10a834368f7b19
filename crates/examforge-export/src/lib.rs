//! examforge-export
//!
//! DOCX + PDF rendering of composed exam papers.

pub mod docx;
pub mod error;
pub mod fetch;
mod logo;
pub mod pdf;
pub mod render;
pub mod styles;

pub use render::{
    ExportFormat, RenderOptions, render_paginated, render_paginated_with, render_structured,
    render_structured_with, suggested_filename,
};
