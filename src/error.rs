//! Contains the `Error` and `Result` types that `mongo_client_wrapper` uses.

use thiserror::Error;

/// The result type for all methods that can return an error in the `mongo_client_wrapper` crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur in the `mongo_client_wrapper` crate. The inner
/// [`ErrorKind`](enum.ErrorKind.html) is boxed to keep `Result` small.
#[derive(Clone, Debug, Error)]
#[error("{kind}")]
#[non_exhaustive]
pub struct Error {
    /// The type of error that occurred.
    pub kind: Box<ErrorKind>,
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        ErrorKind::InvalidArgument {
            message: message.into(),
        }
        .into()
    }

    /// Whether this error originated from the wrapped driver.
    pub fn is_driver_error(&self) -> bool {
        matches!(self.kind.as_ref(), ErrorKind::Driver(_))
    }
}

impl<E> From<E> for Error
where
    ErrorKind: From<E>,
{
    fn from(err: E) -> Self {
        Self {
            kind: Box::new(err.into()),
        }
    }
}

impl std::ops::Deref for Error {
    type Target = ErrorKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

/// The types of errors that can occur.
#[allow(missing_docs)]
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A connection property held a value that could not be interpreted.
    #[error("An invalid connection property was provided: {message}")]
    #[non_exhaustive]
    InvalidArgument { message: String },

    /// An error surfaced by the MongoDB driver.
    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}
