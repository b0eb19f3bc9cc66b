//! Scan engine: normalize, match, validate, score, mask, splice
//!
//! A single synchronous pass over the text. Detectors are independent;
//! matches from different detectors may overlap and are all reported.

use pii_core::Finding;

use crate::registry::Registry;

/// Result of scanning one text
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub findings: Vec<Finding>,
    /// Normalized text with masked values spliced in (or the plain
    /// normalized text when masking is disabled)
    pub redacted_text: String,
}

#[derive(Debug, Clone)]
struct Replacement {
    start: usize,
    end: usize,
    masked: String,
    score: u8,
}

/// Map Devanagari digits (U+0966-U+096F) to ASCII `0`-`9`; every other
/// character passes through. Char count is preserved.
pub fn normalize_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if (0x0966..=0x096F).contains(&code) {
                char::from_digit(code - 0x0966, 10).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// ±48-char window around a span, clipped to text bounds
fn context_window(text: &str, start: usize, end: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(47)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(48)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    &text[from..to]
}

/// Run every detector in `registry` over `text`.
///
/// Matches failing their validator are kept with a reduced score rather
/// than discarded; downstream consumers threshold on `score`.
pub fn scan(registry: &Registry, text: &str, mask: bool) -> ScanOutput {
    let normalized = normalize_digits(text);
    let mut findings: Vec<Finding> = Vec::new();
    let mut replacements: Vec<Replacement> = Vec::new();

    for detector in registry.iter() {
        for caps in detector.pattern.captures_iter(&normalized) {
            let m = match caps.get(1) {
                Some(m) => m,
                None => continue,
            };
            if m.end() <= m.start() {
                continue;
            }
            let value = m.as_str();
            let valid = detector.validator.map(|v| v.check(value)).unwrap_or(true);
            let context = context_window(&normalized, m.start(), m.end());
            let masked = detector.mask.apply(value);

            let mut score: u8 = 1;
            let context_lower = context.to_lowercase();
            if detector.keywords.iter().any(|kw| context_lower.contains(kw)) {
                score += 2;
            }
            if valid {
                score += 2;
            }

            tracing::debug!(
                kind = %detector.kind,
                start = m.start(),
                end = m.end(),
                score,
                valid,
                "detector match"
            );

            findings.push(Finding {
                kind: detector.kind,
                value: value.to_string(),
                masked_value: masked.clone(),
                start: m.start(),
                end: m.end(),
                context: context.to_string(),
                risk: detector.risk,
                score,
            });
            replacements.push(Replacement {
                start: m.start(),
                end: m.end(),
                masked,
                score,
            });
        }
    }

    let redacted_text = if mask {
        apply_replacements(&normalized, replacements)
    } else {
        normalized
    };

    ScanOutput {
        findings,
        redacted_text,
    }
}

/// Splice masked values into `text` by span.
///
/// Spans from different detectors may overlap; the higher-score span wins
/// and the other is dropped (ties keep the earlier-sorted span). Findings
/// themselves are never merged, this only governs the redacted text.
fn apply_replacements(text: &str, mut replacements: Vec<Replacement>) -> String {
    if replacements.is_empty() {
        return text.to_string();
    }
    replacements.sort_by_key(|r| r.start);

    let mut chosen: Vec<Replacement> = Vec::with_capacity(replacements.len());
    for r in replacements {
        match chosen.last() {
            Some(prev) if r.start < prev.end => {
                if r.score > prev.score {
                    chosen.pop();
                    chosen.push(r);
                }
            }
            _ => chosen.push(r),
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for r in &chosen {
        out.push_str(&text[cursor..r.start]);
        out.push_str(&r.masked);
        cursor = r.end;
    }
    out.push_str(&text[cursor..]);
    out
}
