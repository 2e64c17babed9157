use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("BER decode error: {0}")]
    Der(#[from] der::Error),

    #[error("OID error: {0}")]
    Oid(#[from] oid::Error),

    #[error("time-stamp response error: {0}")]
    Timestamp(#[from] timestamp::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
