//! PDF document production.
//!
//! This module builds the combine pipeline's output:
//!
//! - **Layout** (`layout`): fit one raster image onto one fixed-width page
//! - **Assembly** (`assemble`): accumulate fitted pages into a document,
//!   serialized exactly once
//! - **Merge** (`merge`): concatenate complete PDF documents in order,
//!   without touching page content
//!
//! # Example
//!
//! ```rust,no_run
//! use sammelband::pdf::{assemble_images, merge_documents};
//!
//! # fn main() -> sammelband::Result<()> {
//! let photo = std::fs::read("photo.jpg")?;
//! let report = std::fs::read("report.pdf")?;
//!
//! let image_document = assemble_images(&[photo])?.expect("one image, one document");
//! let merged = merge_documents(&[report, image_document])?;
//! std::fs::write("combined_output.pdf", merged)?;
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod error;
pub mod layout;
pub mod merge;

pub use assemble::{DocumentBuilder, assemble_images};
pub use error::PdfError;
pub use layout::{A4_HEIGHT_MM, A4_WIDTH_MM, FittedPage, PageImage};
pub use merge::{merge_documents, page_count};
