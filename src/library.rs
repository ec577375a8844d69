use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Container extensions picked up by a scan. Matched case-sensitively.
pub const AUDIO_EXTENSIONS: [&str; 4] = ["m4a", "mp3", "flac", "wav"];

/// An audio file together with the tags the sync workflow cares about.
///
/// Empty strings stand for absent tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = lyrics.into();
        self
    }
}

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Verify that `dir` exists and is a directory before a scan
pub fn check_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        anyhow::bail!("Directory does not exist: {}", dir.display());
    }
    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }
    Ok(())
}

/// Recursively collect audio files below `dir`, in walk order.
///
/// Unreadable entries are logged and skipped.
pub fn scan(dir: &Path) -> Vec<PathBuf> {
    tracing::info!("Scanning for audio files in: {}", dir.display());

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_audio_file(path) {
            tracing::debug!("Found audio file: {}", path.display());
            paths.push(path.to_path_buf());
        }
    }

    tracing::info!("Scan complete. Found {} audio files", paths.len());
    paths
}
