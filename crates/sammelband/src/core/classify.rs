//! Extension-based upload classification.
//!
//! The declared kind of an upload is determined solely by its filename
//! extension; file content is never sniffed. Files whose extension is not
//! recognized are dropped from processing - dropping is policy, not an
//! error, so the partition reports them instead of failing the batch.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

/// Declared kind of an accepted upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
}

/// Extension to kind mapping for the combine pipeline.
static EXT_TO_KIND: Lazy<HashMap<&'static str, FileKind>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("jpg", FileKind::Image);
    m.insert("jpeg", FileKind::Image);

    m.insert("pdf", FileKind::Pdf);

    m
});

/// Classify a filename by its extension, case-insensitively.
///
/// Returns `None` for missing or unrecognized extensions.
pub fn classify_extension(filename: &str) -> Option<FileKind> {
    let extension = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
    EXT_TO_KIND.get(extension.as_str()).copied()
}

/// One submitted file: original name plus raw bytes. Submission order is the
/// position in the batch `Vec`.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Result of splitting an upload batch by declared kind.
///
/// Relative order within `images` and within `pdfs` equals submission order.
#[derive(Debug, Default)]
pub struct Partition {
    pub images: Vec<Upload>,
    pub pdfs: Vec<Upload>,
    /// Names of files excluded from processing.
    pub dropped: Vec<String>,
}

impl Partition {
    /// True when nothing survived classification.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.pdfs.is_empty()
    }
}

/// Partition a batch into kept and dropped files.
pub fn partition_uploads(uploads: Vec<Upload>) -> Partition {
    let mut partition = Partition::default();
    for upload in uploads {
        match classify_extension(&upload.file_name) {
            Some(FileKind::Image) => partition.images.push(upload),
            Some(FileKind::Pdf) => partition.pdfs.push(upload),
            None => partition.dropped.push(upload.file_name),
        }
    }
    partition
}
