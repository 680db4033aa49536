//! Raw text extraction from statement PDFs.

use std::any::Any;
use std::io;
use std::panic;
use std::path::Path;

use crate::error::{Result, StatementError};

/// Extract the text of every page, concatenated in page order.
pub fn extract_pdf_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(StatementError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("not a file: {}", path.display()),
        )));
    }

    let data = std::fs::read(path)?;
    extract_text_from_bytes(&data)
}

/// `pdf-extract` panics on some malformed documents (missing `/Resources`,
/// unsupported fonts); those panics come back as [`StatementError::Pdf`].
pub fn extract_text_from_bytes(data: &[u8]) -> Result<String> {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
        Ok(extracted) => extracted.map_err(|e| StatementError::Pdf(e.to_string())),
        Err(payload) => Err(StatementError::Pdf(format!(
            "text extraction aborted: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = extract_pdf_text("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, StatementError::Io(e) if e.kind() == io::ErrorKind::NotFound));
    }

    #[test]
    fn test_page_without_resources_is_pdf_error() {
        let err = extract_pdf_text(fixture("no_resources.pdf")).unwrap_err();
        assert!(matches!(err, StatementError::Pdf(_)), "{err:?}");
    }

    #[test]
    fn test_text_comes_back_in_page_order() {
        let text = extract_pdf_text(fixture("november_2023.pdf")).unwrap();
        let period = text.find("November 1 - November 30, 2023").unwrap();
        let coffee = text.find("Coffee Shop").unwrap();
        let interest = text.find("Purchase APR Interest Charge").unwrap();
        assert!(period < coffee && coffee < interest);
    }

    #[test]
    fn test_panic_message_downcasts() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("no resources"));
        assert_eq!(panic_message(owned.as_ref()), "no resources");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
