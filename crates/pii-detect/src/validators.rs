//! Format and checksum predicates per identifier type
//!
//! Every predicate is a pure `&str -> bool`. Types without an entry here
//! (EPIC, IFSC, GSTIN, TAN, UPI, EMAIL) carry no validator in the registry:
//! their pattern alone constrains the format, and that absence is a
//! documented placeholder, not authoritative validation.

use lazy_static::lazy_static;
use regex::Regex;

// Verhoeff multiplication table (dihedral group D5)
const D_TABLE: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

// Verhoeff permutation table, applied cyclically with period 8
const P_TABLE: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

/// Verhoeff check over a digit string: iterate digits in reverse,
/// `c = D[c][P[i % 8][digit]]`, valid iff the final `c == 0`.
fn verhoeff_valid(digits: &str) -> bool {
    let mut c: u8 = 0;
    for (i, ch) in digits.chars().rev().enumerate() {
        let digit = match ch.to_digit(10) {
            Some(d) => d as usize,
            None => return false,
        };
        c = D_TABLE[c as usize][P_TABLE[i % 8][digit] as usize];
    }
    c == 0
}

lazy_static! {
    static ref AADHAAR_RE: Regex = Regex::new(r"^[2-9][0-9]{11}$").unwrap();
    static ref PAN_RE: Regex = Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap();
    static ref PASSPORT_RE: Regex = Regex::new(r"^[A-PR-WY][0-9]{7}$").unwrap();
    static ref DL_RE: Regex = Regex::new(r"^[A-Z]{2}[-\s]?[0-9]{2}[-\s]?[0-9]{11,12}$").unwrap();
}

/// 12-digit Aadhaar: no leading 0/1, Verhoeff checksum must hold.
/// Embedded spaces (the common `1234 5678 9012` grouping) are stripped first.
pub fn is_valid_aadhaar(value: &str) -> bool {
    let clean: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !AADHAAR_RE.is_match(&clean) {
        return false;
    }
    verhoeff_valid(&clean)
}

/// PAN: 5 letters + 4 digits + 1 letter, no checksum defined
pub fn is_valid_pan(value: &str) -> bool {
    PAN_RE.is_match(value)
}

/// Passport: 1 letter (O/Q/X/Z excluded as confusable) + 7 digits
pub fn is_valid_passport(value: &str) -> bool {
    PASSPORT_RE.is_match(value)
}

/// Driving licence: 2 letters, optional separator, 2 digits, optional
/// separator, 11-12 digits
pub fn is_valid_driving_licence(value: &str) -> bool {
    DL_RE.is_match(value)
}

/// Indian mobile: after stripping whitespace/hyphens and an optional
/// `+91`/`91` country prefix, 10 digits starting 6-9 must remain.
pub fn is_valid_mobile(value: &str) -> bool {
    let clean: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let rest = clean
        .strip_prefix("+91")
        .or_else(|| clean.strip_prefix("91").filter(|r| r.len() == 10))
        .unwrap_or(&clean);
    rest.len() == 10
        && rest.starts_with(|c| matches!(c, '6'..='9'))
        && rest.chars().all(|c| c.is_ascii_digit())
}
