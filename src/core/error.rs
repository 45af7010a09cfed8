use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfRange,
    DuplicateKey,
    KeyNotFound,
    InvalidArgument,
    Parse,
}

#[derive(Debug, ThisError)]
#[error("{kind:?}: {context}")]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    pub fn out_of_range(position: impl std::fmt::Display, len: usize) -> Self {
        Error::new(
            ErrorKind::OutOfRange,
            format!("position {} outside store of {} records", position, len),
        )
    }

    pub fn duplicate_key(key: &str) -> Self {
        Error::new(ErrorKind::DuplicateKey, format!("key {} already indexed", key))
    }

    pub fn key_not_found(key: &str) -> Self {
        Error::new(ErrorKind::KeyNotFound, format!("key {} not indexed", key))
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
