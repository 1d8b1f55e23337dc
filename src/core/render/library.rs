//! vis-network embedding
//!
//! Inline mode needs the library code on disk. The first inline run
//! downloads it from the CDN URL and keeps it at the configured path, so
//! later runs work offline and every output file stays self-contained.

use crate::core::error::{Error, Result};
use crate::core::loader::Loader;
use crate::core::writer;
use crate::{info, warn};
use std::fs;
use std::io;
use std::path::Path;

/// How the generated page obtains vis-network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Library {
    /// Library source code, embedded verbatim in a `<script>` element.
    Inline(String),
    /// URL referenced by `<script src>`.
    Cdn(String),
}

impl Library {
    /// Pick the embedding for a run.
    ///
    /// With `cdn` set nothing is read or fetched. Otherwise the code is read
    /// from `library_path`, downloading it from `cdn_url` first when the file
    /// does not exist. A download that cannot be stored is still used.
    ///
    /// # Errors
    /// Returns an error when the library file exists but cannot be read, or
    /// when the download fails.
    pub fn resolve(cdn: bool, cdn_url: &str, library_path: &Path, loader: &Loader) -> Result<Self> {
        if cdn {
            info!("Referencing vis-network from {cdn_url}");
            return Ok(Self::Cdn(cdn_url.to_string()));
        }

        match fs::read_to_string(library_path) {
            Ok(code) => {
                info!("Inlining vis-network from {}", library_path.display());
                Ok(Self::Inline(code))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "{} not found, downloading vis-network from {cdn_url}",
                    library_path.display()
                );
                let code = loader.load(cdn_url)?;
                if let Err(e) = writer::write(library_path, &code) {
                    warn!("Could not cache vis-network: {e}");
                }
                Ok(Self::Inline(code))
            }
            Err(e) => Err(Error::open(library_path, e)),
        }
    }

    /// Returns true for CDN embedding.
    #[must_use]
    pub const fn is_cdn(&self) -> bool {
        matches!(self, Self::Cdn(_))
    }
}
