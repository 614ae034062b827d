//! Per-request temporary file staging.
//!
//! Each request owns a disjoint set of staged paths. Names carry a random
//! UUID so concurrent requests sharing one upload directory cannot collide;
//! the request that staged a file is solely responsible for its cleanup.

use crate::Result;
use std::path::PathBuf;
use uuid::Uuid;

/// Collision-free temp-file namespace for one request.
#[derive(Debug)]
pub struct RequestStaging {
    dir: PathBuf,
    staged: Vec<PathBuf>,
}

impl RequestStaging {
    /// Create a staging handle rooted at `dir`. The directory must already
    /// exist (created once at startup via `ServiceConfig::ensure_dirs`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            staged: Vec::new(),
        }
    }

    /// Write one upload under a fresh randomized name, returning its path.
    pub fn stage(&mut self, extension: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(format!("upload-{}.{}", Uuid::new_v4(), extension));
        std::fs::write(&path, bytes)?;
        self.staged.push(path.clone());
        Ok(path)
    }

    /// Paths staged so far, in staging order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.staged
    }

    /// Hand the owned path set over, typically to the cleanup stage.
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.staged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_writes_distinct_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut staging = RequestStaging::new(dir.path());

        let a = staging.stage("jpg", b"first").expect("stage a");
        let b = staging.stage("jpg", b"second").expect("stage b");

        assert_ne!(a, b);
        assert_eq!(std::fs::read(&a).expect("read a"), b"first");
        assert_eq!(std::fs::read(&b).expect("read b"), b"second");
        assert_eq!(staging.paths(), &[a, b]);
    }

    #[test]
    fn test_stage_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("gone");
        let mut staging = RequestStaging::new(&missing);
        assert!(staging.stage("pdf", b"data").is_err());
    }

    #[test]
    fn test_into_paths_keeps_staging_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut staging = RequestStaging::new(dir.path());
        let first = staging.stage("pdf", b"1").expect("stage");
        let second = staging.stage("pdf", b"2").expect("stage");
        assert_eq!(staging.into_paths(), vec![first, second]);
    }
}
