//! Enumeration of the files in a channel's log directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::LogError;

/// A file found in a log directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub len: u64,
}

impl LogFile {
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// Lists regular files in `dir`, sorted by path.  The directory is created
/// if it does not exist yet.
pub fn list_log_files(dir: &Path) -> Result<Vec<LogFile>, LogError> {
    let io_err = |source| LogError::Io {
        path: dir.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_err)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let metadata = entry.metadata().map_err(io_err)?;
        if !metadata.is_file() {
            continue;
        }
        files.push(LogFile {
            path: entry.path(),
            modified: metadata.modified().map_err(io_err)?,
            len: metadata.len(),
        });
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// The most recently modified file; ties go to the greatest path.
pub fn most_recent(files: Vec<LogFile>) -> Option<LogFile> {
    files
        .into_iter()
        .max_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
