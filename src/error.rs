use thiserror::Error;

#[derive(Error, Debug)]
pub enum BencodeError {
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Bad format at byte {offset}: {reason}")]
    BadFormat { offset: usize, reason: String },

    #[error("Nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),

    #[error("Key not exist: {0}")]
    KeyNotExist(String),

    #[error("Not a map: {0}")]
    NotAMap(String),

    #[error("Type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BencodeError {
    pub(crate) fn bad_format(offset: usize, reason: impl Into<String>) -> Self {
        BencodeError::BadFormat {
            offset,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BencodeError>;
