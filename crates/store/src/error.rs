//! Store Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};
use theke_meta::error::{Error as MetaError, ErrorKind as MetaErrorKind};

/// A store error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// An expected file does not exist.
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied by the filesystem.
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error.
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// A scanned filename or metadata file is not valid UTF-8; user input
    /// problems, distinct from internal faults.
    #[display("text is not valid UTF-8: {_0}")]
    Encoding(#[error(not(source))] String),
    /// A metadata record was malformed for resource consumption.
    #[display("metadata error: {_0}")]
    Metadata(MetaErrorKind),
    /// A declared identifier was zero or not decodable.
    #[display("invalid resource identifier: {_0:?}")]
    InvalidResourceUid(#[error(not(source))] String),
    /// An audio resource has no sibling metadata file.
    #[display("metadata file missing: {}", _0.display())]
    MetadataMissing(#[error(not(source))] PathBuf),
    /// The loader exhausted its identifier allocation probes.
    #[display("could not allocate a free identifier in {}", _0.display())]
    UidAllocation(#[error(not(source))] PathBuf),
    /// The container header or table of contents is not a bundle.
    #[display("not a valid bundle file: {}", _0.display())]
    InvalidBundleFile(#[error(not(source))] PathBuf),
    /// The container holds fewer payload bytes than its TOC declares.
    #[display("bundle is truncated: {}", _0.display())]
    TruncatedBundle(#[error(not(source))] PathBuf),
    /// A bundle cannot hold this many resources.
    #[display("manifest of {_0} resources exceeds the bundle entry limit")]
    TooManyResources(#[error(not(source))] usize),
    /// The catalog has no resource under this identifier.
    #[display("unknown resource: {_0}")]
    UnknownResource(#[error(not(source))] u64),
    /// A bundle-resident resource was touched before any bundle was opened.
    #[display("no bundle has been opened on this catalog")]
    NoBundleOpen,
}

impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Map an I/O error to the caller-actionable kind for a given path.
    pub fn from_io(err: IoError, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }

    /// Convert a metadata error into a store error, preserving the meta
    /// crate's `Exn` frame as a child in its own error tree.
    #[track_caller]
    pub fn metadata(err: MetaError) -> Error {
        let inner = *err;
        err.raise(ErrorKind::Metadata(inner))
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
