//! Best-effort deletion of per-request temporary artifacts.
//!
//! Cleanup runs after the response payload has been fully assembled, on a
//! detached task the request never waits on. The final output returned to
//! the caller is produced in memory and is never among the scheduled paths.

use std::path::PathBuf;

/// Delete `paths` on a detached blocking task.
///
/// The handle is dropped rather than awaited, so the caller's response path
/// is never blocked. Requires a running tokio runtime.
pub fn schedule_cleanup(paths: Vec<PathBuf>) {
    if paths.is_empty() {
        return;
    }
    tokio::task::spawn_blocking(move || remove_all(&paths));
}

/// Per-path best-effort removal. A failed deletion is logged and skipped;
/// it never stops cleanup of the remaining paths.
fn remove_all(paths: &[PathBuf]) {
    for path in paths {
        if let Err(err) = std::fs::remove_file(path) {
            tracing::warn!("failed to delete temporary file {}: {}", path.display(), err);
        }
    }
}
