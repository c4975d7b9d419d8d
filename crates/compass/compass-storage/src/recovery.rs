//! Corrupt document handling.

use std::path::{Path, PathBuf};

/// Move an unreadable document aside so the next save starts clean.
/// Returns the quarantine path on success.
pub(crate) fn quarantine(path: &Path) -> Option<PathBuf> {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
    let mut name = path.file_name()?.to_os_string();
    name.push(format!(".corrupt-{stamp}"));
    let target = path.with_file_name(name);
    match std::fs::rename(path, &target) {
        Ok(()) => {
            tracing::warn!(from = %path.display(), to = %target.display(), "quarantined corrupt document");
            Some(target)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to quarantine corrupt document");
            None
        }
    }
}
