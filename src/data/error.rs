use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// LoadError – the dataset could not be established
// ---------------------------------------------------------------------------

/// Failure to turn a source file into a [`RecordTable`](super::model::RecordTable).
///
/// Fatal for the session: no query can run until a table loads.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("{} contains no header row", path.display())]
    Empty { path: PathBuf },
}

impl LoadError {
    /// Fold an `anyhow` chain from a format reader into a [`LoadError::Parse`].
    pub(crate) fn parse(path: &std::path::Path, err: anyhow::Error) -> Self {
        LoadError::Parse {
            path: path.to_path_buf(),
            message: format!("{err:#}"),
        }
    }
}

// ---------------------------------------------------------------------------
// NoDataAvailable – recoverable, user-visible empty state
// ---------------------------------------------------------------------------

/// Why a KPI could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataReason {
    /// The filter selection matched no rows.
    NoMatchingRows,
    /// The first matching row has no numeric value for the indicator.
    MissingValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no data available for '{indicator}' with the selected filters")]
pub struct NoDataAvailable {
    pub indicator: String,
    pub reason: NoDataReason,
}
