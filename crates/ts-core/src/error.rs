//! Foundation error type.
//!
//! Sub-crates define their own error enums and wrap `TsError` as one variant
//! via `#[from]`, so configuration problems found here surface unchanged.

use thiserror::Error;

/// The top-level error type for `ts-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum TsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Shorthand result type for all `ts-*` crates.
pub type TsResult<T> = Result<T, TsError>;
