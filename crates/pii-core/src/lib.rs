//! Core domain models for the PII engine
//!
//! This crate contains:
//! - Identifier taxonomy (PiiType) and detection results (Finding)
//! - Page geometry (Rect, PageWord) and redaction regions
//! - Error taxonomy shared across the workspace

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Finding, PageWord, PiiType, Rect, RedactionRegion, RegionSource};
