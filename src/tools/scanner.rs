use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const VIDEO_EXTENSIONS: &[&str] = &[
    "avi", "flv", "m4v", "mkv", "mov", "mp4", "mpeg", "mpg", "ts", "webm", "wmv",
];

fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Expand CLI input paths into a flat list of candidate video files.
///
/// Directories are walked recursively and matched by extension, sorted by
/// path so the resulting pool order is stable across runs. Plain file paths
/// are kept as-is; whether they are readable is decided later, when the
/// conversion stage fingerprints them.
#[must_use]
pub fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .follow_links(false)
                .into_iter()
                .filter_map(std::result::Result::ok)
                .filter(|entry| entry.file_type().is_file())
                .filter(|entry| is_video_file(entry.path()))
                .map(walkdir::DirEntry::into_path)
                .collect();
            if found.is_empty() {
                warn!("no video files found under {}", path.display());
            }
            found.sort();
            inputs.extend(found);
        } else {
            inputs.push(path.clone());
        }
    }
    inputs
}
