//! Shared filesystem helpers.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OutputError, Result};

/// `<dir>/<stem>.<extension>`, refusing stems that would leave `dir`.
pub fn file_in_dir(dir: &Path, stem: &str, extension: &str) -> Result<PathBuf> {
    let invalid = stem.is_empty()
        || stem == "."
        || stem == ".."
        || stem.contains(['/', '\\', '\0']);
    if invalid {
        return Err(OutputError::InvalidFileName {
            name: stem.to_string(),
        });
    }
    Ok(dir.join(format!("{stem}.{extension}")))
}

/// Ensure the parent directory of a file exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write UTF-8 text, creating parent directories as needed.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, contents).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
