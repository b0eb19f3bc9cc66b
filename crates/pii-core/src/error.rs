use thiserror::Error;

/// Errors raised while building the detector registry. Backend and I/O
/// faults at the locator/compositor seams travel as `anyhow::Error`
/// instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid detector: {0}")]
    InvalidDetector(String),
}

pub type Result<T> = std::result::Result<T, Error>;
