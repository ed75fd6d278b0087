use crate::domain::models::FileType;

pub const SCRIPT_EXTENSIONS: [&str; 4] = [".js", ".jsx", ".ts", ".tsx"];
pub const STYLE_EXTENSIONS: [&str; 5] = [".css", ".scss", ".sass", ".module.scss", ".less"];

/// Classify an extension, leading dot included.
pub fn classify(extension: &str) -> FileType {
    if SCRIPT_EXTENSIONS.contains(&extension) {
        FileType::Script
    } else if STYLE_EXTENSIONS.contains(&extension) {
        FileType::Style
    } else {
        FileType::Unknown
    }
}

/// Longest recognized extension the file name ends with.
///
/// Matching is done on the full suffix, so `button.module.scss` yields `.module.scss`
/// and `app.test.ts` yields `.ts`.
pub fn extension_of(file_name: &str) -> Option<&'static str> {
    SCRIPT_EXTENSIONS
        .iter()
        .chain(STYLE_EXTENSIONS.iter())
        .filter(|ext| file_name.ends_with(*ext))
        .max_by_key(|ext| ext.len())
        .copied()
}

pub fn classify_file_name(file_name: &str) -> FileType {
    extension_of(file_name).map(classify).unwrap_or(FileType::Unknown)
}

/// Everything before the first dot.
pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_extensions() {
        for ext in SCRIPT_EXTENSIONS {
            assert_eq!(classify(ext), FileType::Script, "{}", ext);
        }
        for ext in STYLE_EXTENSIONS {
            assert_eq!(classify(ext), FileType::Style, "{}", ext);
        }
    }

    #[test]
    fn test_classify_unknown_extensions() {
        assert_eq!(classify(".unknownext"), FileType::Unknown);
        assert_eq!(classify(".rs"), FileType::Unknown);
        assert_eq!(classify("css"), FileType::Unknown);
        assert_eq!(classify(""), FileType::Unknown);
        assert_eq!(classify(".CSS"), FileType::Unknown);
    }

    #[test]
    fn test_extension_of_compound_names() {
        assert_eq!(extension_of("button.module.scss"), Some(".module.scss"));
        assert_eq!(extension_of("theme.scss"), Some(".scss"));
        assert_eq!(extension_of("app.test.ts"), Some(".ts"));
        assert_eq!(extension_of("view.tsx"), Some(".tsx"));
        assert_eq!(extension_of("notes.md"), None);
    }

    #[test]
    fn test_classify_file_name() {
        assert_eq!(classify_file_name("app.ts"), FileType::Script);
        assert_eq!(classify_file_name("app.test.ts"), FileType::Script);
        assert_eq!(classify_file_name("button.module.scss"), FileType::Style);
        assert_eq!(classify_file_name("style.unknownext"), FileType::Unknown);
        assert_eq!(classify_file_name("README"), FileType::Unknown);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("app.test.ts"), "app");
        assert_eq!(base_name("button.module.scss"), "button");
        assert_eq!(base_name("Makefile"), "Makefile");
        assert_eq!(base_name(".eslintrc.js"), "");
    }
}
