use std::path::PathBuf;

pub const DEFAULT_STYLE_EXTENSION: &str = ".css";
pub const DEFAULT_SCRIPT_EXTENSION: &str = ".js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Script,
    Style,
    Unknown,
}

impl FileType {
    /// The category a companion of this file belongs to.
    pub fn companion(self) -> FileType {
        match self {
            FileType::Script => FileType::Style,
            FileType::Style => FileType::Script,
            FileType::Unknown => FileType::Unknown,
        }
    }
}

/// Options as they arrive from the command line, before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub style_extension: Option<String>,
    pub script_extension: Option<String>,
    pub use_directory_name: Option<bool>,
    pub use_other_column: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConfig {
    pub style_extension: String,
    pub script_extension: String,
    pub use_directory_name: bool,
    pub use_other_column: bool,
}

impl ResolutionConfig {
    pub fn from_raw(raw: RawOptions) -> Self {
        fn non_empty(ext: Option<String>, default: &str) -> String {
            match ext {
                Some(ext) if !ext.trim().is_empty() => ext.trim().to_string(),
                _ => default.to_string(),
            }
        }

        ResolutionConfig {
            style_extension: non_empty(raw.style_extension, DEFAULT_STYLE_EXTENSION),
            script_extension: non_empty(raw.script_extension, DEFAULT_SCRIPT_EXTENSION),
            use_directory_name: raw.use_directory_name.unwrap_or(true),
            use_other_column: raw.use_other_column.unwrap_or(false),
        }
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self::from_raw(RawOptions::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    OpenCandidate(PathBuf),
    CreateCompanion(String),
    NoCompanionFound,
}
