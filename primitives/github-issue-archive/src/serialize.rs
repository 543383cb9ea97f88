//! Encodes a finished [`Archive`] as JSON or CSV and writes it out.
//!
//! Encoding happens entirely in memory; the destination is only opened once
//! the bytes are ready, so an encoding failure never leaves a half-written file.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use thiserror::Error;
use tracing::debug;

use crate::archive::Archive;
use crate::error::ArchiveError;
use crate::model::Issue;

/// Column header of the CSV table.
pub const CSV_HEADER: [&str; 9] = [
    "Number",
    "State",
    "Title",
    "User",
    "Comments",
    "URL",
    "Created At",
    "Closed At",
    "Body",
];

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    #[default]
    Csv,
}

impl Format {
    /// File extension used when deriving the default output path.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub fn encode(archive: &Archive, format: Format) -> Result<Vec<u8>, EncodeError> {
    match format {
        Format::Json => encode_json(archive),
        Format::Csv => encode_csv(archive),
    }
}

/// Pretty-printed JSON of the whole archive, newline-terminated.
pub fn encode_json(archive: &Archive) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = serde_json::to_vec_pretty(archive)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// One CSV row per issue under [`CSV_HEADER`]. Comments are not represented.
pub fn encode_csv(archive: &Archive) -> Result<Vec<u8>, EncodeError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for issue in archive.issues() {
        writer.write_record(csv_row(issue))?;
    }
    writer
        .into_inner()
        .map_err(|e| EncodeError::Csv(e.into_error().into()))
}

fn csv_row(issue: &Issue) -> [String; 9] {
    [
        format!("#{}", issue.number),
        issue.state.as_str().to_string(),
        issue.title.clone(),
        issue.author_login().to_string(),
        issue.comments.to_string(),
        issue.url.clone(),
        timestamp(&issue.created_at),
        issue.closed_at.as_ref().map(timestamp).unwrap_or_default(),
        issue.body.clone().unwrap_or_default(),
    ]
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Encodes `archive` and writes it to `path`, replacing any existing file.
///
/// Returns the number of bytes written.
pub fn write_archive(
    archive: &Archive,
    format: Format,
    path: &Path,
) -> Result<usize, ArchiveError> {
    let bytes = encode(archive, format)
        .map_err(|source| ArchiveError::Serialization { format, source })?;

    fs::write(path, &bytes).map_err(|source| ArchiveError::Persistence {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), %format, "archive written");
    Ok(bytes.len())
}
