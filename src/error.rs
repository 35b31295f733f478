//! Error handling for the sort front ends
//!
//! The sort itself cannot fail; every variant here belongs to the layers that
//! turn host input into a typed, totally ordered sequence.

use std::io;
use thiserror::Error;

/// Custom error type for sort operations
#[derive(Error, Debug)]
pub enum SortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Permission denied: {file}")]
    PermissionDenied { file: String },

    #[error("No such file or directory: {file}")]
    FileNotFound { file: String },

    #[error("Is a directory: {file}")]
    IsDirectory { file: String },

    #[error("Unsupported element type at index {index}: {found}")]
    UnsupportedElementType { index: usize, found: String },

    #[error("Unordered value (NaN) at index {index}")]
    UnorderedValue { index: usize },

    #[error("Invalid {element_type} value: '{token}'")]
    InvalidToken { token: String, element_type: String },

    #[error("{file}: invalid buffer size {len} for element width {width}")]
    InvalidBufferLength {
        file: String,
        len: u64,
        width: usize,
    },

    #[error("{file}: buffer is not aligned for its element type")]
    MisalignedBuffer { file: String },

    #[error("disorder at element {index}: {value}")]
    NotSorted { index: usize, value: String },

    #[error("Conflicting sort options: {message}")]
    ConflictingOptions { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },
}

impl SortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::PermissionDenied { .. }
            | SortError::FileNotFound { .. }
            | SortError::IsDirectory { .. }
            | SortError::Io(_) => crate::SORT_FAILURE,

            _ => crate::EXIT_FAILURE,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(file: &str) -> Self {
        SortError::PermissionDenied {
            file: file.to_string(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(file: &str) -> Self {
        SortError::FileNotFound {
            file: file.to_string(),
        }
    }

    /// Create an is directory error
    pub fn is_directory(file: &str) -> Self {
        SortError::IsDirectory {
            file: file.to_string(),
        }
    }

    /// Create an unsupported element type error
    pub fn unsupported_element_type(index: usize, found: &str) -> Self {
        SortError::UnsupportedElementType {
            index,
            found: found.to_string(),
        }
    }

    pub fn unordered_value(index: usize) -> Self {
        SortError::UnorderedValue { index }
    }

    /// Create an invalid token error for the given element type name
    pub fn invalid_token(token: &str, element_type: &str) -> Self {
        SortError::InvalidToken {
            token: token.to_string(),
            element_type: element_type.to_string(),
        }
    }

    pub fn invalid_buffer_length(file: &str, len: u64, width: usize) -> Self {
        SortError::InvalidBufferLength {
            file: file.to_string(),
            len,
            width,
        }
    }

    pub fn misaligned_buffer(file: &str) -> Self {
        SortError::MisalignedBuffer {
            file: file.to_string(),
        }
    }

    /// Create a not sorted error
    pub fn not_sorted(index: usize, value: &str) -> Self {
        SortError::NotSorted {
            index,
            value: value.to_string(),
        }
    }

    /// Create a conflicting options error
    pub fn conflicting_options(message: &str) -> Self {
        SortError::ConflictingOptions {
            message: message.to_string(),
        }
    }

    /// Create a parse error
    pub fn parse_error(message: &str) -> Self {
        SortError::ParseError {
            message: message.to_string(),
        }
    }
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Context trait for adding context to errors
pub trait SortContext<T> {
    fn with_context<F>(self, f: F) -> SortResult<T>
    where
        F: FnOnce() -> String;

    fn with_file_context(self, filename: &str) -> SortResult<T>;
}

impl<T> SortContext<T> for Result<T, io::Error> {
    fn with_context<F>(self, f: F) -> SortResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|io_err| {
            SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", f(), io_err),
            ))
        })
    }

    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|io_err| match io_err.kind() {
            io::ErrorKind::PermissionDenied => SortError::permission_denied(filename),
            io::ErrorKind::NotFound => SortError::file_not_found(filename),
            _ if std::path::Path::new(filename).is_dir() => SortError::is_directory(filename),
            _ => SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", filename, io_err),
            )),
        })
    }
}
