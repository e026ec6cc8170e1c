use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Result of sanitizing an archive entry name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedPath {
    /// Normalized path relative to the extraction root.
    pub relative: PathBuf,
    /// `relative` joined onto the extraction root.
    pub resolved: PathBuf,
}

/// Turn an entry name as recorded in the archive into a path under `base`.
///
/// Backslashes are treated as separators, `.` segments are dropped and `..`
/// segments are folded. Absolute names, drive prefixes, NUL bytes and `..`
/// that climbs above the archive root are rejected.
pub fn sanitize_entry_path(entry: &str, base: &Path) -> Result<SanitizedPath> {
    let relative = normalize_entry_name(entry)?;
    let resolved = base.join(&relative);

    if !resolved.starts_with(base) {
        return Err(unsafe_path(entry));
    }

    Ok(SanitizedPath { relative, resolved })
}

fn normalize_entry_name(entry: &str) -> Result<PathBuf> {
    if entry.contains('\0') {
        return Err(unsafe_path(entry));
    }

    let unified = entry.replace('\\', "/");
    if unified.starts_with('/') {
        return Err(unsafe_path(entry));
    }

    let mut parts: Vec<&str> = Vec::new();
    for (index, part) in unified.split('/').enumerate() {
        match part {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() {
                    return Err(unsafe_path(entry));
                }
            }
            // `C:` and friends
            _ if index == 0 && part.len() == 2 && part.ends_with(':') => {
                return Err(unsafe_path(entry));
            }
            _ => parts.push(part),
        }
    }

    Ok(parts.iter().collect())
}

fn unsafe_path(entry: &str) -> Error {
    Error::UnsafePath {
        entry: entry.to_string(),
    }
}
