use std::io;
use std::path::PathBuf;

/// Errors that end a single switch invocation
#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    #[error("File must be a script or stylesheet: {0}")]
    UnsupportedFileType(String),

    #[error("Could not read directory {}: {source}", .dir.display())]
    DirectoryRead {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not create file {}: {source}", .path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Companion file name must stay in the current directory: {0}")]
    InvalidFileName(String),

    #[error("No companion file found for {0}")]
    NoCompanionFound(String),
}

impl SwitchError {
    /// Informational errors are reported but do not fail the process.
    pub fn is_informational(&self) -> bool {
        matches!(self, SwitchError::NoCompanionFound(_))
    }
}
