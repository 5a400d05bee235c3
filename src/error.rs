// vidbind/src/error.rs
//
//! Various errors that binding methods can produce.

use crate::backend::Backend;

use std::io;

/// Various errors that binding methods can produce.
///
/// Every variant carries a message suitable for presenting to the scripting host as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The native allocator could not satisfy the request.
    #[error("allocation failed: {0}")]
    Allocation(String),
    /// A native call reported failure. The message is the native library's last-error string.
    #[error("{0}")]
    NativeOperation(String),
    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),
    /// A file exists but its content is not in a recognized format.
    #[error("unrecognized file format: {0}")]
    Format(String),
    /// The host supplied a value of the wrong type, e.g. a non-sequence where a sequence was
    /// required.
    #[error("{0}")]
    Type(String),
    /// The host supplied an unacceptable argument, e.g. null where a rectangle was required.
    #[error("{0}")]
    Argument(String),
    /// The window has already been created.
    #[error("window has already been created.")]
    AlreadyCreated,
    /// The operation is deliberately not implemented.
    #[error("not implemented.")]
    NotImplemented,
    /// The resource has no valid native handle and null is not an acceptable state here.
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// Builds a `NativeOperation` error from the backend's last-error string.
    pub fn native(backend: &dyn Backend) -> Error {
        Error::NativeOperation(backend.last_error())
    }

    /// Builds an `Allocation` error from the backend's last-error string.
    pub fn allocation(backend: &dyn Backend) -> Error {
        Error::Allocation(backend.last_error())
    }

    pub(crate) fn type_error(message: &str) -> Error {
        Error::Type(message.to_owned())
    }

    pub(crate) fn argument(message: &str) -> Error {
        Error::Argument(message.to_owned())
    }

    pub(crate) fn runtime(message: &str) -> Error {
        Error::Runtime(message.to_owned())
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error.to_string())
    }
}
