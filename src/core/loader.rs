//! Input loading from a local path or an HTTP(S) URL
//!
//! The loader returns raw text only; parsing happens after raw validation.

use crate::core::error::{Error, Result};
use crate::{debug, info};
use reqwest::blocking::Client;
use reqwest::Url;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Default HTTP timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads flow sources.
#[derive(Debug, Clone, Copy)]
pub struct Loader {
    timeout: Duration,
}

impl Loader {
    /// Create a loader whose HTTP requests give up after `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Load the full text behind `source`.
    ///
    /// `http://` and `https://` sources are fetched with a GET request, the
    /// body taken as UTF-8 regardless of its content type. Anything else is a
    /// local file path.
    ///
    /// # Errors
    /// Returns an I/O flavored error when the file cannot be read, the request
    /// fails, the server answers with a non-success status, or the content is
    /// not UTF-8.
    pub fn load(&self, source: &str) -> Result<String> {
        match http_url(source) {
            Some(url) => self.fetch(url),
            None => read_file(Path::new(source)),
        }
    }

    fn fetch(&self, url: Url) -> Result<String> {
        info!("Fetching {url}");
        let client = Client::builder().timeout(self.timeout).build()?;
        let response = client.get(url.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes()?;
        debug!("Received {} bytes from {url}", body.len());
        String::from_utf8(body.to_vec()).map_err(|e| Error::Io {
            context: format!("read '{url}'"),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// Returns true when `source` would be fetched over HTTP(S).
#[must_use]
pub fn is_url(source: &str) -> bool {
    http_url(source).is_some()
}

fn http_url(source: &str) -> Option<Url> {
    Url::parse(source)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

fn read_file(path: &Path) -> Result<String> {
    info!("Reading {}", path.display());
    fs::read_to_string(path).map_err(|e| Error::open(path, e))
}
