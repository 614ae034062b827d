//! Sammelband - combine and convert uploaded documents.
//!
//! Sammelband offers two independent conversion pipelines:
//!
//! 1. **Combine**: JPEG images and PDF documents are merged into a single
//!    PDF. Each image becomes one fixed-width page; directly-submitted PDFs
//!    keep their submission order and the image-derived document goes last.
//! 2. **Extract**: an RTF document is stripped to plain text and returned as
//!    UTF-8 with a provenance header recording the source name and the
//!    conversion time.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sammelband::{Upload, combine_partition, partition_uploads};
//!
//! # fn main() -> sammelband::Result<()> {
//! let uploads = vec![
//!     Upload { file_name: "report.pdf".into(), bytes: std::fs::read("report.pdf")? },
//!     Upload { file_name: "photo.jpg".into(), bytes: std::fs::read("photo.jpg")? },
//! ];
//! let merged = combine_partition(partition_uploads(uploads))?;
//! std::fs::write("combined_output.pdf", merged)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): classification, temp-file staging, cleanup,
//!   and file I/O shared by both pipelines
//! - **PDF Module** (`pdf`): page layout, document assembly, and merging
//! - **RTF Module** (`rtf`): tolerant markup stripping and the provenance
//!   header
//! - **API** (`api`, feature `api`): axum upload endpoints over the pipelines

#![deny(unsafe_code)]

pub mod config;
pub mod convert;
pub mod core;
pub mod error;
pub mod pdf;
pub mod rtf;

#[cfg(feature = "api")]
pub mod api;

pub use error::{Result, SammelbandError};

pub use config::ServiceConfig;
pub use convert::{combine_partition, combine_staged, combine_to_pdf};
pub use rtf::{ExtractedText, extract_rtf};

pub use core::classify::{FileKind, Partition, Upload, classify_extension, partition_uploads};
pub use core::cleanup::schedule_cleanup;
pub use core::staging::RequestStaging;
