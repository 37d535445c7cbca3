//! Location of the user's documents directory

use std::path::{Path, PathBuf};

/// Directory recordings are written to.
///
/// An explicit override wins. Otherwise the platform documents directory,
/// then the home directory, then the working directory.
pub fn documents_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
