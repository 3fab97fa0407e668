use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

const SUPPORTED_EXTENSIONS: &[&str] = &["docx", "xlsx"];

#[derive(Debug, Error)]
#[error("audio file not found: {name}")]
pub struct MissingAssetError {
    pub name: String,
}

/// The corpus files available for one drill mode's directory.
pub struct Library {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

impl Library {
    /// Scan `dir` for supported corpus files, sorted by file name. A missing
    /// or empty directory yields an empty library; the UI turns that into a
    /// warning, not a failure.
    pub fn scan(dir: &Path) -> Self {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.path())
                    .filter(|path| path.is_file() && is_supported(path))
                    .collect()
            })
            .unwrap_or_default();
        files.sort();
        Self {
            dir: dir.to_path_buf(),
            files,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Warning shown when the directory has nothing to offer.
    pub fn empty_hint(&self) -> String {
        format!(
            "No corpus files found. Put .docx or .xlsx files in {}",
            self.dir.display()
        )
    }

    pub fn file_name(&self, index: usize) -> Option<String> {
        self.files
            .get(index)
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
    }
}

fn is_supported(path: &Path) -> bool {
    // Editors leave ~$-prefixed lock files next to open documents.
    let hidden = path
        .file_name()
        .map(|n| {
            let n = n.to_string_lossy();
            n.starts_with('.') || n.starts_with("~$")
        })
        .unwrap_or(true);
    if hidden {
        return false;
    }
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Resolve a spreadsheet audio reference against the audio directory.
/// Missing files are reported inline on the drill card; the drill goes on.
pub fn resolve_audio(audio_dir: &Path, name: &str) -> Result<PathBuf, MissingAssetError> {
    let path = audio_dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(MissingAssetError {
            name: name.to_string(),
        })
    }
}
