use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a configuration file (1 MB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum size of a property snapshot (256 MB)
pub const MAX_SNAPSHOT_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Reads a regular file into a string
///
/// # Security
/// Uses `symlink_metadata()` so a symbolic link is rejected instead of
/// followed, and checks the size before reading anything.
///
/// # Errors
/// Returns an error if the path is missing, a symbolic link, not a regular
/// file, larger than `max_size`, or not valid UTF-8
pub fn read_regular_file(path: &Path, description: &str, max_size: u64) -> Result<String> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata at {}: {}", description, path.display(), e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }
    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }
    if metadata.len() > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            max_size
        );
    }

    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} at {}: {}", description, path.display(), e))
}

/// Rejects writing through a symbolic link; a missing path is fine
pub fn ensure_not_symlink(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, writing to symbolic links is not allowed.",
            path.display()
        ),
        _ => Ok(()),
    }
}
