//! Output writing

use crate::core::error::{Error, Result};
use crate::info;
use std::fs;
use std::path::Path;

/// Write `content` to `path`, creating missing parent directories and
/// replacing any existing file.
///
/// # Errors
/// Returns [`Error::Io`] when a directory cannot be created or the file
/// cannot be written.
pub fn write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::mkdir(parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::open(path, e))?;
    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("diagram.html");

        write(&path, "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("diagram.html");
        fs::write(&path, "a much longer previous content").unwrap();

        write(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn existing_directory_is_fine() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("diagram.html");

        write(&path, "one").unwrap();
        write(&path, "two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }

    #[test]
    fn parent_that_is_a_file_fails_with_mkdir_context() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = write(&blocker.join("diagram.html"), "x").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err
            .to_string()
            .ends_with(&format!("mkdir '{}'", blocker.display())));
    }
}
