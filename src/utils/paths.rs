use std::path::{Component, Path, PathBuf};

/// Expands a leading `~` to the home directory
///
/// The path is returned unchanged if it has no tilde prefix or the home
/// directory cannot be determined.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }

    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }

    PathBuf::from(path)
}

/// Expresses `path` relative to `base`, using `..` segments when `path` is
/// not below `base`
///
/// Both paths are expected to be absolute and free of `.`/`..` components.
/// If they share no common root (different drives on Windows), `path` is
/// returned unchanged.
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    if let Ok(below) = path.strip_prefix(base) {
        return below.to_path_buf();
    }

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return path.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }

    relative
}
