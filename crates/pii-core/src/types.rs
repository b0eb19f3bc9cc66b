use serde::{Deserialize, Serialize};

/// Closed set of identifier types known at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PiiType {
    #[serde(rename = "AADHAAR")]
    Aadhaar,
    #[serde(rename = "PAN")]
    Pan,
    #[serde(rename = "PASSPORT")]
    Passport,
    #[serde(rename = "EPIC")]
    Epic,
    #[serde(rename = "DL")]
    DrivingLicence,
    #[serde(rename = "IFSC")]
    Ifsc,
    #[serde(rename = "GSTIN")]
    Gstin,
    #[serde(rename = "TAN")]
    Tan,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "PHONE")]
    Phone,
    #[serde(rename = "EMAIL")]
    Email,
}

impl PiiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiType::Aadhaar => "AADHAAR",
            PiiType::Pan => "PAN",
            PiiType::Passport => "PASSPORT",
            PiiType::Epic => "EPIC",
            PiiType::DrivingLicence => "DL",
            PiiType::Ifsc => "IFSC",
            PiiType::Gstin => "GSTIN",
            PiiType::Tan => "TAN",
            PiiType::Upi => "UPI",
            PiiType::Phone => "PHONE",
            PiiType::Email => "EMAIL",
        }
    }
}

impl PiiType {
    /// Parse the wire/report tag (e.g. "AADHAAR", "DL"); case-insensitive
    pub fn from_tag(tag: &str) -> Option<PiiType> {
        let tag = tag.to_ascii_uppercase();
        [
            PiiType::Aadhaar,
            PiiType::Pan,
            PiiType::Passport,
            PiiType::Epic,
            PiiType::DrivingLicence,
            PiiType::Ifsc,
            PiiType::Gstin,
            PiiType::Tan,
            PiiType::Upi,
            PiiType::Phone,
            PiiType::Email,
        ]
        .into_iter()
        .find(|t| t.as_str() == tag)
    }
}

impl std::fmt::Display for PiiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected identifier in normalized text
///
/// `start`/`end` are byte offsets into the normalized text (half-open).
/// They always fall on char boundaries since they come from capture spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: PiiType,
    pub value: String,
    pub masked_value: String,
    pub start: usize,
    pub end: usize,
    /// Surrounding text window (±48 chars, clipped to text bounds)
    pub context: String,
    /// Static severity weight of the identifier type (1-5)
    pub risk: u8,
    /// Confidence score (1-5): regex match + context keyword + validator
    pub score: u8,
}

/// Axis-aligned rectangle in page coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Smallest rect containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Divide all coordinates by `scale` (maps pixel boxes back to page space)
    pub fn descale(&self, scale: f32) -> Rect {
        Rect {
            x0: self.x0 / scale,
            y0: self.y0 / scale,
            x1: self.x1 / scale,
            y1: self.y1 / scale,
        }
    }
}

/// A word with its bounding box, as supplied by the extraction/OCR backend
///
/// Reading order is the order of the containing slice; the core never
/// mutates these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageWord {
    pub text: String,
    pub rect: Rect,
}

impl PageWord {
    pub fn new(text: impl Into<String>, rect: Rect) -> Self {
        Self {
            text: text.into(),
            rect,
        }
    }
}

/// Which locator strategy produced a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionSource {
    Exact,
    WordReconstruction,
    OcrReconstruction,
    DigitReconstruction,
}

/// A rectangular area on a page marked for blackout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionRegion {
    pub page: usize,
    pub rect: Rect,
    /// Left-to-right fraction of the rect to black out (1.0 = full rect)
    pub coverage: f32,
    pub source: RegionSource,
}

impl RedactionRegion {
    pub fn new(page: usize, rect: Rect, coverage: f32, source: RegionSource) -> Self {
        Self {
            page,
            rect,
            coverage: coverage.clamp(0.0, 1.0),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_union() {
        let a = Rect::new(10.0, 10.0, 20.0, 20.0);
        let b = Rect::new(15.0, 5.0, 30.0, 18.0);

        let u = a.union(&b);
        assert_eq!(u, Rect::new(10.0, 5.0, 30.0, 20.0));
    }

    #[test]
    fn test_rect_normalizes_corners() {
        let r = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert!(r.x0 <= r.x1);
        assert!(r.y0 <= r.y1);
        assert_eq!(r.width(), 10.0);
    }

    #[test]
    fn test_rect_descale() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.descale(2.0), Rect::new(5.0, 10.0, 15.0, 20.0));
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(PiiType::from_tag("AADHAAR"), Some(PiiType::Aadhaar));
        assert_eq!(PiiType::from_tag("dl"), Some(PiiType::DrivingLicence));
        assert_eq!(PiiType::from_tag("SSN"), None);
    }

    #[test]
    fn test_pii_type_serialization() {
        let json = serde_json::to_string(&PiiType::Aadhaar).unwrap();
        assert_eq!(json, "\"AADHAAR\"");

        let parsed: PiiType = serde_json::from_str("\"DL\"").unwrap();
        assert_eq!(parsed, PiiType::DrivingLicence);
    }
}
