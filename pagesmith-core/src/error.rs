use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid color: {0:?} is not a 3 or 6 digit hex token")]
    InvalidColor(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid page size: {width} x {height}")]
    InvalidPageSize { width: f64, height: f64 },

    #[error("Builder misuse: {0}")]
    BuilderMisuse(String),

    #[error("Invalid object reference: {0} {1} R")]
    InvalidObjectReference(u32, u16),
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_pdf_error_display() {
        let error = PdfError::InvalidColor("#12".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid color: \"#12\" is not a 3 or 6 digit hex token"
        );
    }

    #[test]
    fn test_pdf_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let pdf_error = PdfError::from(io_error);

        match pdf_error {
            PdfError::Io(ref err) => {
                assert_eq!(err.kind(), ErrorKind::NotFound);
            }
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_all_pdf_error_variants() {
        let errors = vec![
            PdfError::InvalidColor("zz".to_string()),
            PdfError::UnsupportedImageFormat("PNG signature".to_string()),
            PdfError::InvalidImage("no dimensions".to_string()),
            PdfError::InvalidPageSize {
                width: 0.0,
                height: 792.0,
            },
            PdfError::BuilderMisuse("no pages".to_string()),
            PdfError::InvalidObjectReference(9, 0),
        ];

        for error in errors {
            let error_string = error.to_string();
            assert!(!error_string.is_empty());
        }
    }

    #[test]
    fn test_error_chain_display() {
        let errors = [
            (
                "Invalid object reference: 999 0 R",
                PdfError::InvalidObjectReference(999, 0),
            ),
            (
                "Invalid page size: -1 x 792",
                PdfError::InvalidPageSize {
                    width: -1.0,
                    height: 792.0,
                },
            ),
            (
                "Builder misuse: document has no pages",
                PdfError::BuilderMisuse("document has no pages".to_string()),
            ),
        ];

        for (expected, error) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }
}
