//! Fixed-page image layout.
//!
//! Every accepted image becomes exactly one output page. The page is always
//! 210 mm (A4) wide; landscape images are scaled down to that width, while
//! portrait and square images are placed on a full 210 x 297 mm page no
//! matter their true proportions. The strict `> 1` ratio test is observable
//! behavior: a square image takes the full-height branch.

use crate::{Result, SammelbandError};
use image::GenericImageView;

/// A4 page width in millimeters.
pub const A4_WIDTH_MM: f32 = 210.0;
/// A4 page height in millimeters.
pub const A4_HEIGHT_MM: f32 = 297.0;

/// PDF user space is 72 units per inch.
const PT_PER_MM: f32 = 72.0 / 25.4;

/// One decoded raster image's intrinsic geometry.
///
/// Decoding validates the bytes; the raw JPEG data itself is embedded into
/// the output without re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    /// Single-channel source; controls the embedded color space.
    pub grayscale: bool,
}

impl PageImage {
    /// Decode JPEG bytes, capturing pixel dimensions and channel layout.
    ///
    /// Non-JPEG data and undecodable images are fatal for the whole batch.
    pub fn from_jpeg(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Jpeg)?;
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(SammelbandError::image_decode("image has zero pixel dimensions"));
        }
        let grayscale = matches!(
            decoded.color(),
            image::ColorType::L8 | image::ColorType::L16 | image::ColorType::La8 | image::ColorType::La16
        );
        Ok(Self {
            width,
            height,
            grayscale,
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// One output page sized in millimeters. The image is placed at the page
/// origin and scaled to fill the page completely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedPage {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl FittedPage {
    /// Derive the page size for an image.
    ///
    /// Width is fixed at 210 mm. Height is `210 / aspect_ratio` when the
    /// ratio is strictly greater than 1, otherwise the full 297 mm.
    pub fn fit(image: &PageImage) -> Self {
        let aspect_ratio = image.aspect_ratio();
        let height_mm = if aspect_ratio > 1.0 {
            A4_WIDTH_MM / aspect_ratio
        } else {
            A4_HEIGHT_MM
        };
        Self {
            width_mm: A4_WIDTH_MM,
            height_mm,
        }
    }

    pub fn width_pt(&self) -> f32 {
        self.width_mm * PT_PER_MM
    }

    pub fn height_pt(&self) -> f32 {
        self.height_mm * PT_PER_MM
    }
}
