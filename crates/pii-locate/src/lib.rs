//! Coordinate locator: maps a raw detected value back onto rectangular
//! regions of a rendered page, with degraded-input fallbacks (no text
//! layer, OCR-only pages, fuzzy token reconstruction).

pub mod locator;
pub mod page;

pub use locator::{coverage_fraction, RegionLocator};
pub use page::{OcrEngine, PageHandle, RasterImage};
