// Learnify Media Guard - Stream Path Validation
// Copyright (c) 2026 Xing_The_Creator | Learnify

use std::path::{Component, Path, PathBuf};

/// Extensions the lesson player is allowed to stream.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "mkv", "ogg"];

/// Content type for the `<source>` tag, by extension.
pub fn video_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("webm") => "video/webm",
        Some("ogg") => "video/ogg",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        _ => "video/mp4",
    }
}

/// Check a requested stream path and return it if it may be served.
///
/// Rejects traversal, hidden files or folders below `video_dir`, non-video
/// extensions and anything that is not inside `video_dir`. The check is
/// lexical; see [`confine_to_dir`] for the on-disk check.
pub fn validate_stream_path(raw_path: &str, video_dir: &Path) -> Result<PathBuf, String> {
    if raw_path.is_empty() {
        return Err("Access denied: Empty path".to_string());
    }
    let path = PathBuf::from(raw_path);

    for component in path.components() {
        if let Component::ParentDir = component {
            return Err("Access denied: Path traversal detected".to_string());
        }
    }

    if path.file_name().is_none() {
        return Err("Access denied: No file name".to_string());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext {
        Some(e) if VIDEO_EXTENSIONS.contains(&e.as_str()) => {}
        Some(e) => return Err(format!("Access denied: Invalid file extension '.{}'", e)),
        None => return Err("Access denied: No file extension provided".to_string()),
    }

    let relative = path
        .strip_prefix(video_dir)
        .map_err(|_| "Access denied: Outside the video directory".to_string())?;

    // Only components below the video dir; the dir itself may live anywhere.
    for component in relative.components() {
        if let Component::Normal(name) = component {
            if name.to_string_lossy().starts_with('.') {
                return Err("Access denied: Hidden file".to_string());
            }
        }
    }

    Ok(path)
}

/// Resolve symlinks on both sides and make sure the real file still lives
/// under the real `video_dir`. Both paths must exist.
pub fn confine_to_dir(path: &Path, video_dir: &Path) -> Result<PathBuf, String> {
    let real_dir = video_dir
        .canonicalize()
        .map_err(|e| format!("Video directory unavailable: {}", e))?;
    let real_path = path
        .canonicalize()
        .map_err(|e| format!("Cannot resolve path: {}", e))?;

    if !real_path.starts_with(&real_dir) {
        return Err("Access denied: Resolves outside the video directory".to_string());
    }
    Ok(real_path)
}
