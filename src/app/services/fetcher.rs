//! Download of the source dataset
//!
//! Thin blocking HTTP collaborator: fetch the published CSV and land the raw
//! bytes at a destination path. Any fault is fatal to the calling update
//! step; there is no retry.

use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::{Error, Result};

/// Overall request timeout for one download
const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

/// Download `url` and write the response body to `dest`, overwriting
pub fn fetch_to_file(url: &str, dest: &Path) -> Result<()> {
    info!("Downloading {} -> {}", url, dest.display());

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;

    std::fs::write(dest, &bytes)
        .map_err(|e| Error::io(format!("Failed to write '{}'", dest.display()), e))?;

    info!("Downloaded {} bytes", bytes.len());
    Ok(())
}
