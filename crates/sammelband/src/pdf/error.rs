use std::fmt;

#[derive(Debug, Clone)]
pub enum PdfError {
    InvalidPdf(String),
    MissingPageTree,
    MissingCatalog,
    WriteFailed(String),
    IOError(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::InvalidPdf(msg) => write!(f, "Invalid PDF: {}", msg),
            PdfError::MissingPageTree => write!(f, "PDF has no page tree root"),
            PdfError::MissingCatalog => write!(f, "PDF has no document catalog"),
            PdfError::WriteFailed(msg) => write!(f, "PDF serialization failed: {}", msg),
            PdfError::IOError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(io_err) => PdfError::IOError(io_err.to_string()),
            _ => PdfError::InvalidPdf(err.to_string()),
        }
    }
}

impl From<PdfError> for crate::SammelbandError {
    fn from(err: PdfError) -> Self {
        crate::SammelbandError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pdf_error() {
        let err = PdfError::InvalidPdf("corrupted header".to_string());
        assert_eq!(err.to_string(), "Invalid PDF: corrupted header");
    }

    #[test]
    fn test_missing_page_tree_error() {
        let err = PdfError::MissingPageTree;
        assert_eq!(err.to_string(), "PDF has no page tree root");
    }

    #[test]
    fn test_conversion_to_crate_error_is_parsing() {
        let err: crate::SammelbandError = PdfError::MissingCatalog.into();
        assert!(matches!(err, crate::SammelbandError::Parsing { .. }));
    }
}
