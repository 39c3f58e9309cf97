//! Ticket field extraction module.

mod parser;
pub mod rules;

pub use parser::TicketParser;

use crate::models::ticket::TicketFields;

/// Trait for ticket field extractors.
pub trait TicketExtractor {
    /// Extract the ticket fields from normalized document text.
    ///
    /// Never fails: fields that cannot be located are left absent.
    fn extract(&self, text: &str) -> TicketFields;
}
