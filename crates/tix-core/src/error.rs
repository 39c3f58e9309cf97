//! Error types for the tix-core library.

use thiserror::Error;

/// Main error type for the tix library.
#[derive(Error, Debug)]
pub enum TixError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Ticket rule error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Table output error.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while building field rules.
///
/// Extraction itself never fails; a rule that does not match simply
/// leaves its field absent.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A configured pattern is not a valid regular expression.
    #[error("invalid {field} pattern `{pattern}`: {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    /// A configured pattern lacks the capture groups the field reads.
    #[error("{field} pattern `{pattern}` needs at least {needed} capture group(s)")]
    MissingGroup {
        field: String,
        pattern: String,
        needed: usize,
    },
}

/// Errors related to writing the result table.
#[derive(Error, Debug)]
pub enum OutputError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The encoding label is not known.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// The encoding is known but cannot be produced.
    #[error("encoding {0} cannot be used for output")]
    UnsupportedEncoding(String),

    /// A character cannot be represented in the chosen encoding.
    #[error("character {ch:?} cannot be encoded as {encoding}")]
    Unmappable { encoding: String, ch: char },

    /// The delimiter is not a single usable ASCII character.
    #[error("invalid delimiter {0:?}: expected a single ASCII character")]
    InvalidDelimiter(String),
}

/// Result type for the tix library.
pub type Result<T> = std::result::Result<T, TixError>;
