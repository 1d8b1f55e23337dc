//! Error types for the generation pipeline
//!
//! Every stage returns [`Result`]. Messages are shown to the user verbatim,
//! so the wording of the option and schema errors is kept stable.

use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of any pipeline stage.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more required command-line options were not given.
    #[error("No value provided for required options: {}", QuotedList(.0))]
    Options(Vec<&'static str>),

    /// The input source resolved to empty text.
    #[error("No value provided for required keys: 'nodes', 'edges'")]
    EmptyInput,

    /// The parsed input does not have the shape of a flow document.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The input is not valid JSON.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// A local file could not be read, written or have its directory created.
    #[error("{source}, {context}")]
    Io {
        /// Operation and path, e.g. `open '/tmp/flow.json'`.
        context: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The HTTP request for a URL input failed before a response arrived.
    #[error("{0}")]
    Fetch(#[from] reqwest::Error),

    /// The HTTP server answered with a non-success status.
    #[error("Request failed with status code {status}")]
    HttpStatus {
        /// Numeric HTTP status.
        status: u16,
    },

    /// The HTML template could not be rendered.
    #[error("Failed to render diagram: {0}")]
    Render(#[from] askama::Error),

    /// The isolated minifier panicked, timed out or rejected the document.
    #[error("Minification failed: {0}")]
    Minify(String),
}

impl Error {
    /// I/O failure while opening or reading `path`.
    pub fn open(path: &Path, source: io::Error) -> Self {
        Self::Io {
            context: format!("open '{}'", path.display()),
            source,
        }
    }

    /// I/O failure while creating the directory `path`.
    pub fn mkdir(path: &Path, source: io::Error) -> Self {
        Self::Io {
            context: format!("mkdir '{}'", path.display()),
            source,
        }
    }
}

/// Structural problems found in a parsed flow document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Required keys are absent. Top-level keys are reported together,
    /// array element keys one at a time (e.g. `nodes.id`).
    #[error("No value provided for required keys: {}", QuotedList(.0))]
    MissingKeys(Vec<String>),

    /// `nodes` or `edges` exists but is not an array.
    #[error("Expected an array for key: '{0}'")]
    NotAnArray(String),
}

/// Formats names as `'a', 'b'`.
struct QuotedList<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for QuotedList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{item}'")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_error_lists_every_flag() {
        let err = Error::Options(vec!["--input", "--output"]);
        assert_eq!(
            err.to_string(),
            "No value provided for required options: '--input', '--output'"
        );
    }

    #[test]
    fn schema_error_quotes_keys() {
        let err = SchemaError::MissingKeys(vec!["nodes.id".to_string()]);
        assert_eq!(
            err.to_string(),
            "No value provided for required keys: 'nodes.id'"
        );
    }

    #[test]
    fn io_error_keeps_os_message() {
        let source = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let err = Error::open(Path::new("/missing/flow.json"), source);
        assert_eq!(
            err.to_string(),
            "No such file or directory, open '/missing/flow.json'"
        );
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn empty_input_is_not_a_schema_error() {
        assert!(!matches!(Error::EmptyInput, Error::Schema(_)));
    }
}
