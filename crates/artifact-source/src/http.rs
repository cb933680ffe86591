//! Uncached HTTP(S) fetch of the dataset document.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA, USER_AGENT};
use tracing::debug;

use crate::error::{Result, SourceError};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches `url` and returns the raw body.
///
/// Intermediate caches are bypassed so the freshest dataset is returned.
/// Any non-success status is an error; there are no retries.
pub fn fetch(url: &str) -> Result<Vec<u8>> {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|err| network(url, &err))?;

    debug!(url, "fetching dataset");

    let response = client
        .get(url)
        .header(
            USER_AGENT,
            format!("artifact-evaluator/{}", env!("CARGO_PKG_VERSION")),
        )
        .header(ACCEPT, "application/json")
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .map_err(|err| network(url, &err))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().map_err(|err| network(url, &err))?;
    debug!(url, bytes = body.len(), "dataset fetched");
    Ok(body.to_vec())
}

fn network(url: &str, err: &reqwest::Error) -> SourceError {
    SourceError::Network {
        url: url.to_string(),
        message: err.to_string(),
    }
}
