use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DescribeError, Result};

/// File extensions (lower-case, without the dot) treated as images.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif", "heic", "heif",
];

/// Whether `path` carries an allow-listed image extension (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Resolve a file or directory into the images a batch will process.
///
/// - a file yields itself when its extension is allow-listed, otherwise nothing
/// - a directory yields its immediate image files (see [`list_images`])
/// - anything else is [`DescribeError::InvalidPath`]
pub fn resolve_images(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if is_supported_image(path) {
            Ok(vec![path.to_path_buf()])
        } else {
            Ok(Vec::new())
        }
    } else if path.is_dir() {
        list_images(path)
    } else {
        Err(DescribeError::InvalidPath(path.to_path_buf()))
    }
}

/// Immediate child files of `dir` with an allow-listed extension, sorted by
/// file name. Subdirectories are not descended into.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| DescribeError::io(format!("Failed to read {}", dir.display()), e))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| DescribeError::io(format!("Failed to read {}", dir.display()), e))?;
        let path = entry.path();
        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Display name used in progress messages and report blocks.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
