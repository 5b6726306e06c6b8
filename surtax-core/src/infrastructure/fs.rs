// surtax-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes `content` through a temp file in the same directory, then renames it
/// over `path`. Readers never observe a half-written report.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    // Same directory so the rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Creates `target_dir` if needed and atomically writes `file_name` inside it.
pub fn write_artifact(
    target_dir: &Path,
    file_name: &str,
    content: &str,
) -> Result<PathBuf, InfrastructureError> {
    std::fs::create_dir_all(target_dir)?;
    let path = target_dir.join(file_name);
    atomic_write(&path, content)?;
    Ok(path)
}
