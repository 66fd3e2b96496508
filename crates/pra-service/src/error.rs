use thiserror::Error;

use pra_store::StoreError;

/// The four failure kinds surfaced by the storage service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Malformed,
    Backend,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required input is missing or blank.
    #[error("{0}")]
    InvalidArgument(String),

    /// Nothing stored where something was expected.
    #[error("{0}")]
    NotFound(String),

    /// The backend returned bytes that are not the expected envelope.
    #[error("malformed envelope at {key}: {reason}")]
    Malformed { key: String, reason: String },

    /// Any other backend failure.
    #[error("Failed to {op}: {source}")]
    Backend {
        op: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Malformed { .. } => ErrorKind::Malformed,
            Self::Backend { .. } => ErrorKind::Backend,
        }
    }

    pub(crate) fn backend(op: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Backend { op, source }
    }
}

impl From<pra_types::TypeError> for ServiceError {
    fn from(err: pra_types::TypeError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(ServiceError::InvalidArgument("x".into()).kind(), ErrorKind::InvalidArgument);
        assert_eq!(ServiceError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        let malformed = ServiceError::Malformed { key: "k".into(), reason: "r".into() };
        assert_eq!(malformed.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn backend_message_format() {
        let err = ServiceError::backend("store code data")(StoreError::Unavailable("down".into()));
        assert_eq!(err.kind(), ErrorKind::Backend);
        assert_eq!(err.to_string(), "Failed to store code data: backend unavailable: down");
    }

    #[test]
    fn type_errors_are_invalid_arguments() {
        let err: ServiceError = pra_types::TypeError::EmptyPrId.into();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "PR ID cannot be empty");
    }
}
