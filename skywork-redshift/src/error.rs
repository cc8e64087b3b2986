use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no data rows")]
    Empty,

    #[error("{features} feature rows but {targets} targets")]
    LengthMismatch { features: usize, targets: usize },

    #[error("need at least {needed} rows, found {found}")]
    InsufficientData { needed: usize, found: usize },

    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("model used before fit")]
    NotFitted,

    #[error("fit error: {0}")]
    Fit(String),

    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_lengths(features: usize, targets: usize) -> Result<()> {
    if features != targets {
        return Err(Error::LengthMismatch { features, targets });
    }
    Ok(())
}
