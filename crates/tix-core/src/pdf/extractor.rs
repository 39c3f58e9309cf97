//! PDF text extraction using lopdf and pdf-extract.

use std::panic;

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    min_text_length: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            min_text_length: 20,
        }
    }

    /// Set the minimum text length for a PDF to count as text-based.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self, text: &str) -> PdfType {
        let chars = text.chars().filter(|c| !c.is_whitespace()).count();
        let pdf_type = if chars >= self.min_text_length {
            PdfType::Text
        } else {
            PdfType::Empty
        };

        debug!("PDF analysis: {} chars text -> {:?}", chars, pdf_type);
        pdf_type
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        // pdf-extract panics on some malformed font data
        let data = &self.raw_data;
        let extracted = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data))
            .map_err(|_| PdfError::TextExtraction("text decoder panicked".to_string()))?;

        extracted.map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
