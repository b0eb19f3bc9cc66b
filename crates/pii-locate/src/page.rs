//! Backend traits for page access
//!
//! The locator never parses documents or performs OCR itself; it consumes
//! word-level text with bounding boxes from whatever document backend is
//! configured, and hands rasterized pages to an external OCR engine.

use pii_core::{PageWord, Rect};

/// A rasterized page produced by the document backend
///
/// Coordinates of anything recognized on it are in pixels and must be
/// divided by the upscale factor to map back into page space.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Packed RGB8 samples, row-major
    pub data: Vec<u8>,
}

/// One page of a document, as exposed by the document backend
pub trait PageHandle {
    /// Direct substring search, if the backend supports one
    fn search_exact(&self, value: &str) -> anyhow::Result<Vec<Rect>>;

    /// Word-level text layer in reading order (may be empty for
    /// image-only pages)
    fn words(&self) -> anyhow::Result<Vec<PageWord>>;

    /// Render the page at the given upscale factor
    fn rasterize(&self, scale: f32) -> anyhow::Result<RasterImage>;
}

/// External OCR collaborator
pub trait OcrEngine {
    /// Recognize words with pixel-space bounding boxes
    fn recognize(&self, image: &RasterImage) -> anyhow::Result<Vec<PageWord>>;
}
