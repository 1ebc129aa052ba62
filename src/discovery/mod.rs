use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::core::TraceError;

/// Paths of all regular `.csv` files directly inside `dir`, sorted by
/// name for a deterministic ingestion order. Non-recursive.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>, TraceError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| TraceError::IoError(format!("reading directory {}: {}", dir.display(), e)))?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("csv") && path.is_file() {
                Some(path)
            } else {
                None
            }
        })
        .collect();

    files.sort();

    Ok(files)
}

/// Size and mtime snapshot of a file listing. Two equal fingerprints
/// mean a reload would produce the same table contents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceFingerprint {
    entries: Vec<(PathBuf, u64, SystemTime)>,
}

impl SourceFingerprint {
    pub fn capture(paths: &[PathBuf]) -> Result<SourceFingerprint, TraceError> {
        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            let metadata = std::fs::metadata(path).map_err(|e| {
                TraceError::IoError(format!("reading metadata for {}: {}", path.display(), e))
            })?;
            let modified = metadata.modified().map_err(|e| {
                TraceError::IoError(format!(
                    "reading modified time for {}: {}",
                    path.display(),
                    e
                ))
            })?;
            entries.push((path.clone(), metadata.len(), modified));
        }
        Ok(SourceFingerprint { entries })
    }
}
