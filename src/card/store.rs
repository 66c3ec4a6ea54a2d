//! Persisted card files and their freshness check.

use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Context as _;

use crate::foundation::error::{CardError, CardResult};

/// Bytes of the card at `path` if it exists and was modified at most `lifetime` ago.
///
/// A missing file is a plain miss; any other IO failure is a [`CardError::CacheRead`] the
/// caller is expected to treat as a miss. Ages are compared in whole seconds, and files with
/// a modification time in the future count as fresh.
pub fn read_fresh(path: &Path, lifetime: Duration) -> CardResult<Option<Vec<u8>>> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CardError::cache_read(format!("stat '{}': {e}", path.display()))),
    };
    let modified = meta
        .modified()
        .map_err(|e| CardError::cache_read(format!("mtime '{}': {e}", path.display())))?;
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO);
    if age.as_secs() > lifetime.as_secs() {
        return Ok(None);
    }
    std::fs::read(path)
        .map(Some)
        .map_err(|e| CardError::cache_read(format!("read '{}': {e}", path.display())))
}

/// Write `bytes` to `path`, creating the parent directory and replacing any previous card.
pub fn write(path: &Path, bytes: &[u8]) -> CardResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write card '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/card/store.rs"]
mod tests;
