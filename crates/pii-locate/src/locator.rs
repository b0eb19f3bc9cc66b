//! Strategy chain for locating a value on a page
//!
//! Exact search, then word reconstruction over the text layer, then OCR
//! reconstruction for image-only pages, then a digit-only pass for
//! numeric IDs whose separators or letters were misread. Each stage is
//! tried only when the previous one yields nothing; backend failures
//! degrade to the next stage instead of aborting.

use pii_core::{PageWord, Rect, RedactionRegion, RegionSource};

use crate::page::{OcrEngine, PageHandle};

/// Fraction of a matched rect's width to black out, keeping the final
/// 4 characters visible (mirrors the keep-last-4 text mask). Values
/// shorter than 4 characters after stripping punctuation are covered
/// in full.
pub fn coverage_fraction(value: &str) -> f32 {
    let len = value.chars().filter(|c| c.is_alphanumeric()).count();
    if len >= 4 {
        (len - 4) as f32 / len as f32
    } else {
        1.0
    }
}

fn norm_alnum(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn norm_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Greedy reconstruction: concatenate consecutive normalized words until
/// they equal the target, abandoning a start index once the accumulated
/// length reaches 3x the target length.
fn reconstruct(words: &[PageWord], norms: &[String], target: &str) -> Vec<Rect> {
    let mut rects = Vec::new();
    if target.is_empty() {
        return rects;
    }
    let limit = target.len() * 3;

    for i in 0..norms.len() {
        if norms[i].is_empty() {
            continue;
        }
        let mut acc = String::new();
        let mut j = i;
        while j < norms.len() && acc.len() < limit {
            acc.push_str(&norms[j]);
            if acc == target {
                let rect = words[i..=j]
                    .iter()
                    .map(|w| w.rect)
                    .reduce(|a, b| a.union(&b))
                    .unwrap_or(words[i].rect);
                rects.push(rect);
                break;
            }
            j += 1;
        }
    }
    rects
}

/// Locates redaction regions for raw values on single pages
#[derive(Debug, Clone)]
pub struct RegionLocator {
    /// Raster upscale factor for the OCR fallback
    pub upscale: f32,
}

impl Default for RegionLocator {
    fn default() -> Self {
        Self { upscale: 2.0 }
    }
}

impl RegionLocator {
    pub fn new(upscale: f32) -> Self {
        Self { upscale }
    }

    /// Zero or more regions for `value` on `page`. A miss is an empty
    /// vec, never an error.
    pub fn locate(
        &self,
        page: &dyn PageHandle,
        page_index: usize,
        ocr: Option<&dyn OcrEngine>,
        value: &str,
    ) -> Vec<RedactionRegion> {
        let coverage = coverage_fraction(value);

        // 1. Exact search
        match page.search_exact(value) {
            Ok(rects) if !rects.is_empty() => {
                return rects
                    .into_iter()
                    .map(|r| RedactionRegion::new(page_index, r, coverage, RegionSource::Exact))
                    .collect();
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(page = page_index, error = %e, "exact search failed");
            }
        }

        // 2. Word layer, falling back to OCR for image-only pages
        let mut words = match page.words() {
            Ok(words) => words,
            Err(e) => {
                tracing::warn!(page = page_index, error = %e, "word extraction failed");
                Vec::new()
            }
        };
        let mut source = RegionSource::WordReconstruction;

        if words.is_empty() {
            if let Some(engine) = ocr {
                words = self.ocr_words(page, page_index, engine);
                source = RegionSource::OcrReconstruction;
            }
        }
        if words.is_empty() {
            return Vec::new();
        }

        // 3. Reconstruction over normalized word text
        let norms: Vec<String> = words.iter().map(|w| norm_alnum(&w.text)).collect();
        let target = norm_alnum(value);
        let rects = reconstruct(&words, &norms, &target);
        if !rects.is_empty() {
            return rects
                .into_iter()
                .map(|r| RedactionRegion::new(page_index, r, coverage, source))
                .collect();
        }

        // 4. Digit-only pass for numeric IDs with misread separators
        let digits = norm_digits(value);
        if digits.len() >= 6 {
            let digit_norms: Vec<String> = words.iter().map(|w| norm_digits(&w.text)).collect();
            let rects = reconstruct(&words, &digit_norms, &digits);
            if !rects.is_empty() {
                return rects
                    .into_iter()
                    .map(|r| {
                        RedactionRegion::new(
                            page_index,
                            r,
                            coverage,
                            RegionSource::DigitReconstruction,
                        )
                    })
                    .collect();
            }
        }

        tracing::debug!(page = page_index, "no region found for value");
        Vec::new()
    }

    /// Rasterize at the upscale factor, recognize, and map pixel boxes
    /// back into page space
    fn ocr_words(
        &self,
        page: &dyn PageHandle,
        page_index: usize,
        engine: &dyn OcrEngine,
    ) -> Vec<PageWord> {
        let image = match page.rasterize(self.upscale) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(page = page_index, error = %e, "rasterization failed");
                return Vec::new();
            }
        };
        match engine.recognize(&image) {
            Ok(words) => words
                .into_iter()
                .filter(|w| !w.text.trim().is_empty())
                .map(|w| PageWord::new(w.text, w.rect.descale(self.upscale)))
                .collect(),
            Err(e) => {
                tracing::warn!(page = page_index, error = %e, "ocr failed");
                Vec::new()
            }
        }
    }
}
