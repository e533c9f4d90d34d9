use std::path::{Path, PathBuf};

use crate::foundation::error::{StoryreelError, StoryreelResult};

/// Normalize and validate a relative asset path.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> StoryreelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(StoryreelError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(StoryreelError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(StoryreelError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(StoryreelError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Resolve a public-asset reference (`"/narration.mp3"`) against the public directory.
///
/// A single leading `/` means "root of the public directory", not the filesystem root.
pub fn resolve_static_file(public_dir: &Path, src: &str) -> StoryreelResult<PathBuf> {
    let trimmed = src.trim();
    let rel = trimmed.strip_prefix('/').unwrap_or(trimmed);
    let norm = normalize_rel_path(rel)?;
    Ok(public_dir.join(Path::new(&norm)))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/paths.rs"]
mod tests;
