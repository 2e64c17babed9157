//! Error types for object identifiers.

use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("OBJECT IDENTIFIER: no data")]
    NoData,
    #[error("OBJECT IDENTIFIER: incomplete encoding")]
    IncompleteEncoding,
    #[error("OBJECT IDENTIFIER: arc exceeds 64 bits")]
    ArcOverflow,
    #[error("OBJECT IDENTIFIER: too few components (need at least 2)")]
    TooFewComponents,
    #[error("OBJECT IDENTIFIER: invalid first arcs {0}.{1}")]
    InvalidFirstArcs(u64, u64),
    #[error("OBJECT IDENTIFIER: invalid component: {0}")]
    InvalidComponent(#[source] ParseIntError),
    #[error("OBJECT IDENTIFIER: expected tag 0x06, got {0:02x?}")]
    UnexpectedIdentifier(Vec<u8>),
}
