use thiserror::Error;

/// Errors produced while building identifiers and keys.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("PR ID cannot be empty")]
    EmptyPrId,

    #[error("file name cannot be empty")]
    EmptyFileName,
}

pub type TypeResult<T> = Result<T, TypeError>;
