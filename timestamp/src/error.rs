//! Error types for time-stamp responses.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid BER: {0}")]
    Der(#[from] der::Error),
    #[error("{0}: missing")]
    Missing(&'static str),
    #[error("{field}: unexpected identifier {identifier:02x?}")]
    UnexpectedIdentifier {
        field: &'static str,
        identifier: Vec<u8>,
    },
    #[error("{0}: unexpected trailing element")]
    UnexpectedElement(&'static str),
    #[error("INTEGER: invalid encoding")]
    InvalidInteger,
    #[error("PKIStatus: unknown value {0}")]
    UnknownStatus(i64),
    #[error("UTF8String: invalid UTF-8")]
    InvalidUtf8,
    #[error("BIT STRING: invalid encoding")]
    InvalidBitString,
}
