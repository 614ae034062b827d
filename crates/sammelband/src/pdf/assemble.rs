//! Assembling fitted image pages into one PDF document.
//!
//! Pages are appended in call order. The JPEG data is embedded as a
//! `DCTDecode` image XObject without re-encoding, and the page content
//! stream scales it to fill the fitted page exactly. `finish` serializes
//! the document once; consuming the builder makes a second finalization
//! unrepresentable.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use crate::Result;
use crate::pdf::error::PdfError;
use crate::pdf::layout::{FittedPage, PageImage};

/// Incrementally built image-only PDF document.
pub struct DocumentBuilder {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    /// Append one page holding `bytes` as a full-page JPEG.
    pub fn push_image(&mut self, bytes: &[u8]) -> Result<()> {
        let info = PageImage::from_jpeg(bytes)?;
        let page = FittedPage::fit(&info);

        let color_space = if info.grayscale { "DeviceGray" } else { "DeviceRGB" };
        let image_stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => info.width as i64,
                "Height" => info.height as i64,
                "ColorSpace" => color_space,
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            bytes.to_vec(),
        )
        .with_compression(false);
        let image_id = self.document.add_object(image_stream);

        let width_pt = page.width_pt();
        let height_pt = page.height_pt();

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(width_pt),
                        Object::Real(0.0),
                        Object::Real(0.0),
                        Object::Real(height_pt),
                        Object::Real(0.0),
                        Object::Real(0.0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_stream = Stream::new(dictionary! {}, content.encode().map_err(PdfError::from)?);
        let content_id = self.document.add_object(content_stream);

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(width_pt),
                Object::Real(height_pt),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Serialize the accumulated document to bytes, exactly once.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let count = self.page_ids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.document
            .save_to(&mut bytes)
            .map_err(|err| PdfError::WriteFailed(err.to_string()))?;
        Ok(bytes)
    }
}

/// Convert the ordered image sequence into one document.
///
/// Returns `None` when there is nothing to lay out; the caller treats that
/// as "nothing to merge", not as an error.
pub fn assemble_images(images: &[Vec<u8>]) -> Result<Option<Vec<u8>>> {
    if images.is_empty() {
        return Ok(None);
    }
    let mut builder = DocumentBuilder::new();
    for bytes in images {
        builder.push_image(bytes)?;
    }
    builder.finish().map(Some)
}
