//! Type-specific masking policies
//!
//! The policy is a static property of each detector, not a call-time
//! option. Masking is deterministic: the same value always produces the
//! same masked output.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskPolicy {
    /// Star all but the final 4 characters (embedded whitespace dropped)
    KeepLast4,
    /// Keep the first 3 and last characters, star the middle
    KeepFirst3Last1,
    /// Star the local part except its first/last char, keep domain verbatim
    Email,
    /// Star every character
    Full,
}

impl MaskPolicy {
    pub fn apply(&self, value: &str) -> String {
        match self {
            MaskPolicy::KeepLast4 => mask_keep_last4(value),
            MaskPolicy::KeepFirst3Last1 => mask_keep_first3_last1(value),
            MaskPolicy::Email => mask_email(value),
            MaskPolicy::Full => "*".repeat(value.chars().count()),
        }
    }
}

fn mask_keep_last4(value: &str) -> String {
    let clean: Vec<char> = value.chars().filter(|c| !c.is_whitespace()).collect();
    let keep = clean.len().min(4);
    let stars = "*".repeat(clean.len() - keep);
    let tail: String = clean[clean.len() - keep..].iter().collect();
    format!("{}{}", stars, tail)
}

fn mask_keep_first3_last1(value: &str) -> String {
    let clean: Vec<char> = value.chars().filter(|c| !c.is_whitespace()).collect();
    if clean.len() <= 4 {
        return "*".repeat(clean.len());
    }
    let head: String = clean[..3].iter().collect();
    let stars = "*".repeat(clean.len() - 4);
    format!("{}{}{}", head, stars, clean[clean.len() - 1])
}

fn mask_email(value: &str) -> String {
    let (local, domain) = match value.split_once('@') {
        Some(parts) => parts,
        None => return "*".repeat(value.chars().count()),
    };
    let chars: Vec<char> = local.chars().collect();
    let masked_local = if chars.len() <= 2 {
        "*".repeat(chars.len())
    } else {
        format!(
            "{}{}{}",
            chars[0],
            "*".repeat(chars.len() - 2),
            chars[chars.len() - 1]
        )
    };
    format!("{}@{}", masked_local, domain)
}
