//! Detector registry
//!
//! An immutable, ordered table of detectors built once at startup and
//! passed by reference into the scan engine. Order determines scan order
//! only; every detector runs over the full text independently.

use lazy_static::lazy_static;
use regex::Regex;

use pii_core::{Error, PiiType, Result};

use crate::mask::MaskPolicy;
use crate::validators;

/// Closed set of validation predicates (see `validators`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Aadhaar,
    Pan,
    Passport,
    DrivingLicence,
    Phone,
}

impl Validator {
    pub fn check(&self, value: &str) -> bool {
        match self {
            Validator::Aadhaar => validators::is_valid_aadhaar(value),
            Validator::Pan => validators::is_valid_pan(value),
            Validator::Passport => validators::is_valid_passport(value),
            Validator::DrivingLicence => validators::is_valid_driving_licence(value),
            Validator::Phone => validators::is_valid_mobile(value),
        }
    }
}

/// One identifier type: pattern, optional validator, masker, context
/// keywords, and a static risk weight (1-5)
#[derive(Debug, Clone)]
pub struct Detector {
    pub kind: PiiType,
    pub pattern: Regex,
    pub validator: Option<Validator>,
    pub mask: MaskPolicy,
    pub keywords: &'static [&'static str],
    pub risk: u8,
}

impl Detector {
    pub fn new(
        kind: PiiType,
        pattern: &str,
        validator: Option<Validator>,
        mask: MaskPolicy,
        keywords: &'static [&'static str],
        risk: u8,
    ) -> Result<Self> {
        let pattern = Regex::new(pattern)?;
        // Exactly one capture group: the candidate value
        if pattern.captures_len() != 2 {
            return Err(Error::InvalidDetector(format!(
                "{} pattern must have exactly one capture group",
                kind
            )));
        }
        Ok(Self {
            kind,
            pattern,
            validator,
            mask,
            keywords,
            risk,
        })
    }
}

/// Ordered, immutable sequence of detectors
#[derive(Debug, Clone)]
pub struct Registry {
    detectors: Vec<Detector>,
}

impl Registry {
    pub fn new(detectors: Vec<Detector>) -> Self {
        Self { detectors }
    }

    /// The built-in table, compiled once per process
    pub fn built_in() -> &'static Registry {
        &BUILT_IN
    }

    pub fn iter(&self) -> impl Iterator<Item = &Detector> {
        self.detectors.iter()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Registry with the given types removed (config-driven opt-out)
    pub fn without(self, disabled: &[PiiType]) -> Registry {
        Registry {
            detectors: self
                .detectors
                .into_iter()
                .filter(|d| !disabled.contains(&d.kind))
                .collect(),
        }
    }
}

fn build_built_in() -> Registry {
    // Patterns use `\b` boundaries where the upstream rules used digit
    // look-arounds; the regex crate supports neither look-behind nor
    // look-ahead.
    let detectors = vec![
        Detector::new(
            PiiType::Aadhaar,
            r"\b([2-9][0-9]{3}\s?[0-9]{4}\s?[0-9]{4})\b",
            Some(Validator::Aadhaar),
            MaskPolicy::KeepLast4,
            &["aadhaar", "uidai", "uid"],
            5,
        ),
        Detector::new(
            PiiType::Pan,
            r"\b([A-Z]{5}[0-9]{4}[A-Z])\b",
            Some(Validator::Pan),
            MaskPolicy::KeepFirst3Last1,
            &["pan", "permanent account"],
            4,
        ),
        Detector::new(
            PiiType::Passport,
            r"\b([A-PR-WY][0-9]{7})\b",
            Some(Validator::Passport),
            MaskPolicy::KeepFirst3Last1,
            &["passport"],
            4,
        ),
        Detector::new(
            PiiType::Epic,
            r"\b([A-Z]{3}[0-9]{7})\b",
            None,
            MaskPolicy::KeepFirst3Last1,
            &["voter", "epic"],
            3,
        ),
        Detector::new(
            PiiType::DrivingLicence,
            r"\b([A-Z]{2}[-\s]?[0-9]{2}[-\s]?[0-9]{11,12})\b",
            Some(Validator::DrivingLicence),
            MaskPolicy::KeepFirst3Last1,
            &["driver", "driving", "dl"],
            3,
        ),
        Detector::new(
            PiiType::Ifsc,
            r"\b([A-Z]{4}0[A-Z0-9]{6})\b",
            None,
            MaskPolicy::KeepFirst3Last1,
            &["ifsc"],
            2,
        ),
        Detector::new(
            PiiType::Gstin,
            r"\b([0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][A-Z0-9]Z[A-Z0-9])\b",
            None,
            MaskPolicy::KeepFirst3Last1,
            &["gstin", "gst"],
            3,
        ),
        Detector::new(
            PiiType::Tan,
            r"\b([A-Z]{4}[0-9]{5}[A-Z])\b",
            None,
            MaskPolicy::KeepFirst3Last1,
            &["tan"],
            2,
        ),
        Detector::new(
            PiiType::Upi,
            r"\b([a-zA-Z0-9._-]{2,256}@[a-zA-Z]{2,64})\b",
            None,
            MaskPolicy::KeepFirst3Last1,
            &["upi", "vpa"],
            2,
        ),
        Detector::new(
            PiiType::Phone,
            r"(\+91[\s-]?[6-9][0-9]{9}\b|\b[6-9][0-9]{9}\b)",
            Some(Validator::Phone),
            MaskPolicy::KeepLast4,
            &["phone", "mobile", "contact"],
            2,
        ),
        Detector::new(
            PiiType::Email,
            r"\b([a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+)\b",
            None,
            MaskPolicy::Email,
            &["email", "mail"],
            2,
        ),
    ];

    // Built-in patterns are static and verified by tests
    Registry::new(detectors.into_iter().collect::<Result<Vec<_>>>().unwrap())
}

lazy_static! {
    static ref BUILT_IN: Registry = build_built_in();
}
