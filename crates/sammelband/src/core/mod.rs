//! Core pipeline support.
//!
//! Everything both conversion pipelines share lives here:
//!
//! - **Classification** (`classify`): extension-based partitioning of an
//!   upload batch into images, PDFs, and dropped files
//! - **Staging** (`staging`): per-request temp files under collision-free
//!   names
//! - **Cleanup** (`cleanup`): detached best-effort deletion of staged files
//! - **I/O** (`io`): file reading helpers with the crate's error mapping

pub mod classify;
pub mod cleanup;
pub mod io;
pub mod staging;

pub use classify::{FileKind, Partition, Upload, classify_extension, partition_uploads};
pub use cleanup::schedule_cleanup;
pub use staging::RequestStaging;
