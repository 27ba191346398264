use crate::core::error::{PackError, PackResult};
use std::path::{Path, PathBuf};

/// Lockfile names that mark a project root, in lookup order.
pub const ROOT_LOCKFILE_NAMES: &[&str] = &["yarn.lock", "package-lock.json"];

/// Get the fnpack home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\fnpack
/// - Linux: ~/.config/fnpack
/// - macOS: ~/Library/Application Support/fnpack
pub fn fnpack_home() -> PackResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| PackError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("fnpack"))
}

/// Get the config file path
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\fnpack\config.yaml
/// - Linux: ~/.config/fnpack/config.yaml
/// - macOS: ~/Library/Application Support/fnpack/config.yaml
pub fn config_file() -> PackResult<PathBuf> {
    Ok(fnpack_home()?.join("config.yaml"))
}

/// Find the nearest directory at or above `start` containing one of `names`
pub fn find_up(names: &[&str], start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        for name in names {
            if current.join(name).exists() {
                return Some(current);
            }
        }

        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            return None;
        }
    }
}

/// Find the project root by looking for a lockfile
///
/// In a workspace this is the monorepo root, where the single shared
/// lockfile lives. Returns `None` when no lockfile exists anywhere up
/// the tree; callers fall back to the directory they started from.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    find_up(ROOT_LOCKFILE_NAMES, start)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> PackResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Resolve `path` against `base` unless it is already absolute
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Render a path with forward slashes, the separator npm manifests and
/// lockfiles use on every platform
pub fn to_posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Prefix a relative reference with a path offset, normalizing separators.
///
/// An empty offset is the identity: the reference already resolves from
/// where it is.
pub fn join_relative(offset: &str, reference: &str) -> String {
    if offset.is_empty() {
        return reference.to_string();
    }
    format!("{}/{}", offset, reference).replace('\\', "/")
}
