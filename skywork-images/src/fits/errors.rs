//! Failures while reading or writing a primary HDU.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum FitsError {
    #[error("not a readable FITS image: {0}")]
    InvalidFormat(String),

    #[error("required keyword {keyword} missing from header")]
    KeywordNotFound { keyword: String },

    #[error("unsupported BITPIX {0}")]
    InvalidBitPix(i64),

    #[error("malformed header card: {0}")]
    HeaderParse(String),

    #[error("keyword {keyword} has unusable value {value}")]
    InvalidKeywordValue { keyword: String, value: String },

    #[error("file ends before the header or data unit is complete")]
    UnexpectedEof,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FitsError {
    /// Short reads become [`FitsError::UnexpectedEof`] so a truncated file is
    /// reported as such rather than as a generic I/O failure.
    pub(crate) fn from_read(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::UnexpectedEof,
            _ => Self::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, FitsError>;
