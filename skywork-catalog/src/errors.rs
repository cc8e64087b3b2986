use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalogue is empty")]
    Empty,

    #[error("malformed catalogue at line {line}: {message}")]
    Malformed { line: u64, message: String },

    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn malformed(line: u64, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }
}
