//! examforge-core
//!
//! Pure domain types and the composed layout model for exam-paper rendering.
//! No I/O and no rendering backend. This is the shared vocabulary consumed by
//! both encoders in `examforge-export`, so the numbering, option-grid, and
//! section rules exist in exactly one place.

pub mod clock;
pub mod layout;
pub mod models;
pub mod numbering;
pub mod options;
pub mod text;
