//! Descriptor resource port.

use std::io::BufRead;
use std::sync::Arc;
use thiserror::Error;

/// Result type for descriptor resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Locates descriptor resources by path.
pub trait DescriptorResourceProvider: Send + Sync {
    /// Returns every resource stored under `path`, in search order.
    ///
    /// A path with no resources yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Locate`] when the search itself fails.
    fn locate(&self, path: &str) -> ResourceResult<Vec<Box<dyn DescriptorResource>>>;
}

/// A single readable descriptor resource.
pub trait DescriptorResource: Send + Sync {
    /// Human-readable location used in diagnostics.
    fn location(&self) -> &str;

    /// Opens the resource for line-oriented reading.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Unreadable`] when the resource cannot be
    /// opened.
    fn open(&self) -> ResourceResult<Box<dyn BufRead + '_>>;
}

/// Errors returned by descriptor resource adapters.
#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    /// Searching for resources under a path failed.
    #[error("failed to locate descriptor resources under {path}: {source}")]
    Locate {
        /// Resource path that was searched.
        path: String,
        /// Underlying I/O failure.
        source: Arc<std::io::Error>,
    },

    /// A located resource could not be opened or read.
    #[error("failed to read descriptor resource {location}: {source}")]
    Unreadable {
        /// Resource location.
        location: String,
        /// Underlying I/O failure.
        source: Arc<std::io::Error>,
    },
}

impl ResourceError {
    /// Wraps a failure to search under `path`.
    #[must_use]
    pub fn locate(path: impl Into<String>, err: std::io::Error) -> Self {
        Self::Locate {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps a failure to open or read the resource at `location`.
    #[must_use]
    pub fn unreadable(location: impl Into<String>, err: std::io::Error) -> Self {
        Self::Unreadable {
            location: location.into(),
            source: Arc::new(err),
        }
    }
}
