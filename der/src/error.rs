//! Errors returned while decoding BER input.
//!
//! Messages describe the structural fact of the failure only. They never
//! carry input octets, which may be sensitive.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("early EOF")]
    EarlyEof,
    #[error("trailing data")]
    TrailingData,
    #[error("indefinite length not supported")]
    UnsupportedIndefiniteLength,
    #[error("length method not supported")]
    UnsupportedLength,
    #[error("invalid BER data: declared length does not match content")]
    InvalidStructuralData,
    #[error("nesting exceeds maximum depth of {limit}")]
    NestingTooDeep { limit: usize },
    // Window bounds violations. Unreachable unless the header decoder is wrong.
    #[error("invalid slice")]
    InvalidSlice,
    #[error("invalid offset")]
    InvalidOffset,
}
