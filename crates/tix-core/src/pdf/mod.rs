//! PDF processing module.

mod extractor;
mod normalize;

pub use extractor::PdfExtractor;
pub use normalize::normalize_text;

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// No usable text layer (scanned or empty document).
    Empty,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Classify the PDF by the amount of text it carries.
    fn analyze(&self, text: &str) -> PdfType;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}
