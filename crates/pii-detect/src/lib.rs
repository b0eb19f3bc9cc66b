//! Detection pipeline: validators, masking policies, the detector
//! registry, and the scan engine that turns raw text into findings
//! plus a redacted variant.

pub mod mask;
pub mod registry;
pub mod scan;
pub mod validators;

pub use mask::MaskPolicy;
pub use registry::{Detector, Registry, Validator};
pub use scan::{normalize_digits, scan, ScanOutput};
