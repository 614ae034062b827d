//! Pipeline orchestration.
//!
//! The combine pipeline turns a classified upload batch into one merged PDF:
//! images are assembled into a synthesized document, which is merged after
//! the directly-submitted PDFs, all in submission order. A failure at any
//! stage aborts the whole batch; there is no partial output.

use std::path::PathBuf;

use crate::core::classify::Partition;
use crate::core::io;
use crate::pdf::{assemble_images, merge_documents};
use crate::{Result, SammelbandError};

/// Combine image and PDF byte streams into one merged PDF.
///
/// `pdfs` keep their submission order; the document synthesized from
/// `images` always goes last. Submitting neither is an error.
pub fn combine_to_pdf(images: Vec<Vec<u8>>, pdfs: Vec<Vec<u8>>) -> Result<Vec<u8>> {
    let assembled = assemble_images(&images)?;

    let mut documents = pdfs;
    if let Some(bytes) = assembled {
        documents.push(bytes);
    }
    if documents.is_empty() {
        return Err(SammelbandError::validation(
            "nothing to produce: no images or PDF documents were submitted",
        ));
    }

    merge_documents(&documents)
}

/// Combine a classified partition (convenience over [`combine_to_pdf`]).
pub fn combine_partition(partition: Partition) -> Result<Vec<u8>> {
    let images = partition.images.into_iter().map(|upload| upload.bytes).collect();
    let pdfs = partition.pdfs.into_iter().map(|upload| upload.bytes).collect();
    combine_to_pdf(images, pdfs)
}

/// Combine from staged files on disk.
///
/// Reads every staged path back and runs [`combine_to_pdf`]; an unreadable
/// staged file is an I/O error that fails the batch.
pub fn combine_staged(image_paths: &[PathBuf], pdf_paths: &[PathBuf]) -> Result<Vec<u8>> {
    let mut images = Vec::with_capacity(image_paths.len());
    for path in image_paths {
        images.push(io::read_file_sync(path)?);
    }
    let mut pdfs = Vec::with_capacity(pdf_paths.len());
    for path in pdf_paths {
        pdfs.push(io::read_file_sync(path)?);
    }
    combine_to_pdf(images, pdfs)
}
