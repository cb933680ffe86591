//! Dataset loading for the artifact evaluator.
//!
//! The dataset is read exactly once per session, from a local file or an
//! HTTP(S) URL, then parsed and validated into an immutable [`Dataset`].
//! Any failure here is a load failure: fatal, and never retried.
//!
//! # Example
//!
//! ```ignore
//! use artifact_source::{DataLocation, load_dataset};
//!
//! let location = DataLocation::parse("artifact_data.json");
//! let dataset = load_dataset(&location)?;
//! ```

mod error;
mod http;

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use artifact_model::{Dataset, WireDataset};
use tracing::{info, info_span};

// === Error Types ===
pub use error::{Result, SourceError};

/// Relative path the dataset is read from when no location is given.
pub const DEFAULT_DATA_PATH: &str = "artifact_data.json";

/// Where the dataset document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    File(PathBuf),
    Http(String),
}

impl DataLocation {
    /// Treats `http://` and `https://` prefixes as URLs, anything else as a path.
    pub fn parse(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Http(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl Default for DataLocation {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_DATA_PATH))
    }
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(url),
        }
    }
}

/// Reads, parses and validates the dataset at `location`.
///
/// # Errors
///
/// Returns [`SourceError`] when the document cannot be read or fetched, the
/// server answers with a non-success status, or the payload does not match
/// the dataset schema.
pub fn load_dataset(location: &DataLocation) -> Result<Dataset> {
    let span = info_span!("load", location = %location);
    let _guard = span.enter();
    let start = Instant::now();

    let bytes = match location {
        DataLocation::File(path) => fs::read(path).map_err(|source| SourceError::FileRead {
            path: path.clone(),
            source,
        })?,
        DataLocation::Http(url) => http::fetch(url)?,
    };
    let dataset = parse_dataset(&bytes, &location.to_string())?;

    info!(
        sets = dataset.set_names().len(),
        combos = dataset.combos().count(),
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parses and validates a dataset document already in memory.
///
/// `location` is only used in error messages.
pub fn parse_dataset(bytes: &[u8], location: &str) -> Result<Dataset> {
    let wire: WireDataset = serde_json::from_slice(bytes).map_err(|source| SourceError::Parse {
        location: location.to_string(),
        source,
    })?;
    Dataset::from_wire(wire).map_err(|source| SourceError::Invalid {
        location: location.to_string(),
        source,
    })
}
