//! Run-level error taxonomy. Every variant is fatal for the run.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::serialize::{EncodeError, Format};
use crate::source::SourceError;

/// The paginated collection a walker is draining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Issues,
    Comments,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Issues => "issues",
            Self::Comments => "comments",
        })
    }
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("failed to fetch {stream} page {page}")]
    Transport {
        stream: Stream,
        page: u32,
        #[source]
        source: SourceError,
    },

    #[error("failed to encode archive as {format}")]
    Serialization {
        format: Format,
        #[source]
        source: EncodeError,
    },

    #[error("failed to write {}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
