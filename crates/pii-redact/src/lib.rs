//! Redaction compositor: turns located regions into blacked-out page
//! content, preferring the backend's native content-removing redaction
//! and falling back to drawing opaque rectangles, and aggregates
//! per-detection results across a document.

pub mod compositor;
pub mod run;

pub use compositor::{apply_regions, RedactionOutcome, RedactionTarget};
pub use run::{RedactionRun, RunSummary};
