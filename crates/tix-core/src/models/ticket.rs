//! Ticket records and the per-run result table.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the extracted ticket fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Date,
    Price,
    Origin,
    Destination,
}

impl Field {
    /// The four fields every ticket is expected to carry.
    pub const ALL: [Field; 4] = [Field::Date, Field::Price, Field::Origin, Field::Destination];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Date => "date",
            Field::Price => "price",
            Field::Origin => "origin",
            Field::Destination => "destination",
        };
        f.write_str(name)
    }
}

/// Travel date as found on the ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelDate {
    /// A valid calendar date.
    Parsed(NaiveDate),
    /// A date-like token that is not a valid calendar date, kept verbatim.
    Raw(String),
}

impl fmt::Display for TravelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelDate::Parsed(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            TravelDate::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Ticket price.
///
/// The text is kept exactly as printed (`1.234,56`); the decimal value is
/// only used for totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount as printed on the ticket.
    pub text: String,
    /// Parsed amount, if the text is a readable number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Fields extracted from one ticket text. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFields {
    /// Travel date.
    pub date: Option<TravelDate>,
    /// Total price.
    pub price: Option<Price>,
    /// Leading keyword of the route line (`Einfache Fahrt`, `Hinfahrt`).
    pub trip_kind: Option<String>,
    /// Departure station.
    pub origin: Option<String>,
    /// Arrival station.
    pub destination: Option<String>,
}

impl TicketFields {
    /// Whether the given field was found.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Date => self.date.is_some(),
            Field::Price => self.price.is_some(),
            Field::Origin => self.origin.is_some(),
            Field::Destination => self.destination.is_some(),
        }
    }

    /// Fields that could not be located.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| !self.has(*f)).collect()
    }

    /// Number of the four main fields that could not be located.
    pub fn unresolved_count(&self) -> usize {
        self.missing().len()
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// Identifier of the source PDF.
    pub source: String,
    /// Extracted fields (all absent when the file failed).
    pub fields: TicketFields,
    /// Error note when the file could not be decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TicketRecord {
    /// Record for a file whose text was read.
    pub fn extracted(source: impl Into<String>, fields: TicketFields) -> Self {
        Self {
            source: source.into(),
            fields,
            error: None,
        }
    }

    /// Record for a file that could not be decoded.
    pub fn failed(source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            fields: TicketFields::default(),
            error: Some(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Ordered records of one run, one per processed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultTable {
    records: Vec<TicketRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, keeping discovery order.
    pub fn push(&mut self, record: TicketRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TicketRecord] {
        &self.records
    }

    /// Number of files that could not be decoded.
    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_failed()).count()
    }

    /// Whether any record carries an error note.
    pub fn has_errors(&self) -> bool {
        self.records.iter().any(TicketRecord::is_failed)
    }

    /// Total number of unresolved main fields over all records.
    pub fn unresolved_fields(&self) -> usize {
        self.records.iter().map(|r| r.fields.unresolved_count()).sum()
    }

    /// Sum of all parsed prices.
    pub fn total_price(&self) -> Decimal {
        self.records
            .iter()
            .filter_map(|r| r.fields.price.as_ref())
            .filter_map(|p| p.amount)
            .sum()
    }
}

impl FromIterator<TicketRecord> for ResultTable {
    fn from_iter<I: IntoIterator<Item = TicketRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
