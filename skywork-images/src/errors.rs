use crate::fits::FitsError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StackError {
    #[error("Nothing to stack")]
    Empty,

    #[error("Image {index} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Signal {index} has {actual} samples, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("Failed to load {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: FitsError,
    },

    #[error(transparent)]
    Fits(#[from] FitsError),
}

pub type Result<T> = std::result::Result<T, StackError>;
