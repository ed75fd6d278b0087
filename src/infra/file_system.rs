use crate::domain::error::SwitchError;
use log::{debug, info};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Names of the non-directory entries of `dir`, sorted by file name.
pub fn list_siblings(dir: &Path) -> Result<Vec<String>, SwitchError> {
    debug!("Listing siblings in: {}", dir.display());

    let mut names = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| SwitchError::DirectoryRead {
            dir: dir.to_path_buf(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("directory walk failed")),
        })?;

        // Follows symlinks, so a link to a directory is skipped too.
        if entry.path().is_dir() {
            continue;
        }

        names.push(entry.file_name().to_string_lossy().to_string());
    }

    info!("Found {} files next to the current file", names.len());
    Ok(names)
}

/// Create a new empty file. An existing file is never overwritten.
pub fn create_empty_file(path: &Path) -> Result<(), SwitchError> {
    debug!("Creating empty file: {}", path.display());
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| SwitchError::FileCreate {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Created companion file: {}", path.display());
    Ok(())
}
