//! Server error types.
//!
//! Every variant is recovered at the handler boundary into the
//! not-found PDF response; the type exists for classification and
//! logging, never for HTTP error bodies.

use std::path::PathBuf;

/// Error raised while serving a page.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServeError {
    /// The URL path cannot map to a content file.
    #[error("invalid request path: {0}")]
    InvalidPath(String),

    /// The content file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
