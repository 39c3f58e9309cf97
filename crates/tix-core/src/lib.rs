//! Core library for Deutsche Bahn ticket PDF processing.
//!
//! This crate provides:
//! - PDF text extraction and whitespace normalization
//! - Ticket field extraction (travel date, price, origin, destination)
//!   driven by configurable, priority-ordered rules
//! - Delimited table output with a configurable delimiter and encoding

pub mod error;
pub mod models;
pub mod output;
pub mod pdf;
pub mod ticket;

pub use error::{ExtractionError, OutputError, PdfError, Result, TixError};
pub use models::config::{ExtractionConfig, PatternRule, PdfConfig, TixConfig};
pub use models::ticket::{Field, Price, ResultTable, TicketFields, TicketRecord, TravelDate};
pub use output::{parse_delimiter, OutputEncoding, TableWriter};
pub use pdf::{normalize_text, PdfExtractor, PdfProcessor, PdfType};
pub use ticket::{TicketExtractor, TicketParser};
