use crate::core::classifier::{
    SCRIPT_EXTENSIONS, STYLE_EXTENSIONS, base_name, classify_file_name,
};
use crate::domain::error::SwitchError;
use crate::domain::models::{FileType, ResolutionConfig, ResolutionResult};
use log::{debug, info};
use std::path::Path;

const INDEX_NAME: &str = "index";

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn parent_dir_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().to_string())
}

/// Classify the current file, rejecting anything that is neither script nor style.
pub fn ensure_supported(current_path: &Path) -> Result<FileType, SwitchError> {
    let current_name = file_name_of(current_path);
    match classify_file_name(&current_name) {
        FileType::Unknown => Err(SwitchError::UnsupportedFileType(current_name)),
        file_type => Ok(file_type),
    }
}

/// Siblings sharing the base name of `current_name` from the opposite category,
/// in listing order.
pub fn find_candidates(current_name: &str, siblings: &[String], file_type: FileType) -> Vec<String> {
    let base = base_name(current_name);
    if base.is_empty() {
        debug!("No base name for {}, skipping direct match", current_name);
        return Vec::new();
    }

    let wanted = file_type.companion();
    siblings
        .iter()
        .filter(|name| name.as_str() != current_name)
        .filter(|name| base_name(name) == base)
        .filter(|name| wanted != FileType::Unknown && classify_file_name(name) == wanted)
        .cloned()
        .collect()
}

fn named_with(stem: &str, extensions: &[&str]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| format!("{}{}", stem, ext))
        .collect()
}

/// Directory-name and index fallbacks. Every existing match is collected in
/// extension-list order.
///
/// An `index` file looks for companions named after its directory. A style file
/// also looks for `index` scripts.
pub fn fallback_candidates(
    current_name: &str,
    dir_name: Option<&str>,
    siblings: &[String],
    file_type: FileType,
) -> Vec<String> {
    let is_index = base_name(current_name) == INDEX_NAME;
    let names: Vec<String> = match (file_type, dir_name) {
        (FileType::Script, Some(dir_name)) if is_index => {
            named_with(dir_name, &STYLE_EXTENSIONS)
        }
        (FileType::Style, Some(dir_name)) if is_index => {
            let mut names = named_with(dir_name, &SCRIPT_EXTENSIONS);
            names.extend(named_with(INDEX_NAME, &SCRIPT_EXTENSIONS));
            names
        }
        (FileType::Style, _) => named_with(INDEX_NAME, &SCRIPT_EXTENSIONS),
        _ => Vec::new(),
    };

    names
        .into_iter()
        .filter(|name| name != current_name && siblings.contains(name))
        .collect()
}

/// Direct candidates, or the fallback ones when there are none and the
/// directory-name mode is on.
pub fn companion_candidates(
    current_path: &Path,
    siblings: &[String],
    file_type: FileType,
    config: &ResolutionConfig,
) -> Vec<String> {
    let current_name = file_name_of(current_path);
    let candidates = find_candidates(&current_name, siblings, file_type);
    if !candidates.is_empty() || !config.use_directory_name {
        return candidates;
    }

    let dir_name = parent_dir_name(current_path);
    let fallback = fallback_candidates(&current_name, dir_name.as_deref(), siblings, file_type);
    debug!(
        "No direct companion for {}, fallback found {} candidates",
        current_name,
        fallback.len()
    );
    fallback
}

/// Pick the candidate listed right after the current file, wrapping around to the
/// earliest listed candidate.
pub fn select_next(candidates: &[String], siblings: &[String], current_name: &str) -> Option<String> {
    let position = |name: &str| siblings.iter().position(|sibling| sibling == name);
    let current = position(current_name);

    let mut ranked: Vec<(usize, &String)> = candidates
        .iter()
        .filter(|name| name.as_str() != current_name)
        .filter_map(|name| position(name).map(|pos| (pos, name)))
        .collect();
    ranked.sort_by_key(|(pos, _)| *pos);

    ranked
        .iter()
        .find(|(pos, _)| current.is_none_or(|cur| *pos > cur))
        .or_else(|| ranked.first())
        .map(|(_, name)| (*name).clone())
}

/// Every candidate in the order repeated switching opens them, starting from the
/// current file.
pub fn cycle_order(candidates: &[String], siblings: &[String], current_name: &str) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut current = current_name.to_string();
    while order.len() < candidates.len() {
        match select_next(candidates, siblings, &current) {
            Some(next) if !order.contains(&next) => {
                current = next.clone();
                order.push(next);
            }
            _ => break,
        }
    }
    order
}

/// Name offered when a new companion has to be created.
pub fn default_companion_name(
    current_path: &Path,
    file_type: FileType,
    config: &ResolutionConfig,
) -> Option<String> {
    let current_name = file_name_of(current_path);
    let base = base_name(&current_name);
    if base.is_empty() {
        return None;
    }

    let extension = match file_type {
        FileType::Script => &config.style_extension,
        FileType::Style => &config.script_extension,
        FileType::Unknown => return None,
    };

    let dir_name = parent_dir_name(current_path);
    let stem = match dir_name.as_deref() {
        Some(dir_name) if base == INDEX_NAME && config.use_directory_name => dir_name,
        _ => base,
    };

    Some(format!("{}{}", stem, extension))
}

pub fn resolve(
    current_path: &Path,
    siblings: &[String],
    config: &ResolutionConfig,
) -> Result<ResolutionResult, SwitchError> {
    let file_type = ensure_supported(current_path)?;
    let current_name = file_name_of(current_path);
    debug!(
        "Resolving companion for {} ({:?}) among {} siblings",
        current_name,
        file_type,
        siblings.len()
    );

    let candidates = companion_candidates(current_path, siblings, file_type, config);
    if let Some(next) = select_next(&candidates, siblings, &current_name) {
        info!("Selected companion {} of {} candidates", next, candidates.len());
        let dir = current_path.parent().unwrap_or_else(|| Path::new(""));
        return Ok(ResolutionResult::OpenCandidate(dir.join(next)));
    }

    match default_companion_name(current_path, file_type, config) {
        Some(name) => {
            info!("No companion found, suggesting {}", name);
            Ok(ResolutionResult::CreateCompanion(name))
        }
        None => Ok(ResolutionResult::NoCompanionFound),
    }
}
