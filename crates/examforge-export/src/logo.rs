//! Logo decoding shared by both renderers.
//!
//! Bytes are decoded once, up front. Both renderers need the pixel
//! dimensions for aspect-preserving placement, and decoding early means a
//! corrupt image downgrades to the wordmark instead of failing an export.

use std::io::Cursor;

use printpdf::image_crate::{DynamicImage, ImageFormat};
use tracing::warn;

pub(crate) struct LogoImage {
    /// Canonical PNG encoding of the image. The DOCX writer decodes the
    /// bytes again with a leaner codec set than the decoder used here, so
    /// raw fetched bytes in a format like PNM would pass `decode` and still
    /// fail there. Every consumer gets the one shared format instead.
    pub(crate) bytes: Vec<u8>,
    pub(crate) image: DynamicImage,
}

impl LogoImage {
    /// Decode raw logo bytes. Undecodable bytes are reported and dropped so
    /// the caller falls back to the wordmark.
    pub(crate) fn decode(bytes: Vec<u8>) -> Option<LogoImage> {
        let image = match printpdf::image_crate::load_from_memory(&bytes) {
            Ok(image) => image,
            Err(e) => {
                warn!(error = %e, "logo bytes did not decode, falling back to wordmark");
                return None;
            }
        };

        let mut png = Cursor::new(Vec::new());
        if let Err(e) = image.write_to(&mut png, ImageFormat::Png) {
            warn!(error = %e, "logo re-encode failed, falling back to wordmark");
            return None;
        }
        Some(LogoImage {
            bytes: png.into_inner(),
            image,
        })
    }

    pub(crate) fn width(&self) -> u32 {
        self.image.width()
    }

    pub(crate) fn height(&self) -> u32 {
        self.image.height()
    }

    /// Scale the image to fit a square box of side `bound`, preserving the
    /// aspect ratio. Returns the fitted width and height in the caller's
    /// units.
    pub(crate) fn fit_within(&self, bound: f64) -> (f64, f64) {
        let w = self.width() as f64;
        let h = self.height() as f64;
        let scale = (bound / w).min(bound / h);
        (w * scale, h * scale)
    }
}
