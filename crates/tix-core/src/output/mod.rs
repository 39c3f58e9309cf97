//! Delimited table output.

mod encoding;

pub use encoding::OutputEncoding;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::OutputError;
use crate::models::ticket::{ResultTable, TicketRecord};

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Column headers, in output order.
pub const HEADERS: [&str; 6] = ["Datei", "Datum", "Preis", "Fahrtart", "Start", "Ziel"];

/// Header of the error note column, present only when some file failed.
pub const ERROR_HEADER: &str = "Fehler";

/// Parse a delimiter option such as `;`, `,`, `|` or `\t`.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    let unescaped = match s {
        r"\t" => "\t",
        r"\\" => "\\",
        other => other.strip_prefix('\\').unwrap_or(other),
    };

    match unescaped.as_bytes() {
        [b] if b.is_ascii() && !matches!(*b, b'"' | b'\n' | b'\r') => Ok(*b),
        _ => Err(OutputError::InvalidDelimiter(s.to_string())),
    }
}

/// Serializes a [`ResultTable`] with a configurable delimiter and encoding.
#[derive(Debug, Clone, Copy)]
pub struct TableWriter {
    delimiter: u8,
    encoding: OutputEncoding,
}

impl TableWriter {
    /// Semicolon-delimited, UTF-8 with BOM.
    pub fn new() -> Self {
        Self {
            delimiter: b';',
            encoding: OutputEncoding::default(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Render the table to encoded bytes.
    pub fn render(&self, table: &ResultTable) -> Result<Vec<u8>> {
        let with_errors = table.has_errors();

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(vec![]);

        let mut header: Vec<&str> = HEADERS.to_vec();
        if with_errors {
            header.push(ERROR_HEADER);
        }
        wtr.write_record(&header)?;

        for record in table.records() {
            wtr.write_record(row(record, with_errors))?;
        }

        let data = wtr.into_inner().map_err(|e| OutputError::Io(e.into_error()))?;
        // csv only ever receives &str cells
        let text = String::from_utf8_lossy(&data);

        self.encoding.encode(&text)
    }

    /// Render the table and write it to `path`.
    pub fn write(&self, table: &ResultTable, path: &Path) -> Result<()> {
        let bytes = self.render(table)?;
        fs::write(path, &bytes)?;

        debug!(
            "Wrote {} rows ({} bytes, {}) to {}",
            table.len(),
            bytes.len(),
            self.encoding,
            path.display()
        );
        Ok(())
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn row(record: &TicketRecord, with_errors: bool) -> Vec<String> {
    let fields = &record.fields;
    let mut cells = vec![
        record.source.clone(),
        fields.date.as_ref().map(|d| d.to_string()).unwrap_or_default(),
        fields.price.as_ref().map(|p| p.to_string()).unwrap_or_default(),
        fields.trip_kind.clone().unwrap_or_default(),
        fields.origin.clone().unwrap_or_default(),
        fields.destination.clone().unwrap_or_default(),
    ];
    if with_errors {
        cells.push(record.error.clone().unwrap_or_default());
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ticket::{Price, TicketFields, TravelDate};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn ticket(source: &str) -> TicketRecord {
        TicketRecord::extracted(
            source,
            TicketFields {
                date: Some(TravelDate::Parsed(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap())),
                price: Some(Price {
                    text: "1.049,90".into(),
                    amount: None,
                }),
                trip_kind: Some("Einfache Fahrt".into()),
                origin: Some("Berlin Hbf".into()),
                destination: Some("München Hbf".into()),
            },
        )
    }

    fn render(writer: TableWriter, table: &ResultTable) -> String {
        String::from_utf8(writer.render(table).unwrap()).unwrap()
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter(r"\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter(r"\|").unwrap(), b'|');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("\"").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn test_render_with_bom() {
        let table: ResultTable = vec![ticket("a.pdf")].into_iter().collect();
        let bytes = TableWriter::new().render(&table).unwrap();

        assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
        assert_eq!(
            String::from_utf8_lossy(&bytes[3..]),
            "Datei;Datum;Preis;Fahrtart;Start;Ziel\n\
             a.pdf;2024-02-10;1.049,90;Einfache Fahrt;Berlin Hbf;München Hbf\n"
        );
    }

    #[test]
    fn test_error_column_only_when_needed() {
        let table: ResultTable = vec![ticket("a.pdf"), TicketRecord::failed("b.pdf", "PDF is encrypted")]
            .into_iter()
            .collect();
        let writer = TableWriter::new().with_encoding(OutputEncoding::Utf8 { bom: false });

        assert_eq!(
            render(writer, &table),
            "Datei;Datum;Preis;Fahrtart;Start;Ziel;Fehler\n\
             a.pdf;2024-02-10;1.049,90;Einfache Fahrt;Berlin Hbf;München Hbf;\n\
             b.pdf;;;;;;PDF is encrypted\n"
        );
    }

    #[test]
    fn test_delimiter_changes_only_separator() {
        let table: ResultTable = vec![ticket("a.pdf"), ticket("b.pdf")].into_iter().collect();
        let plain = TableWriter::new().with_encoding(OutputEncoding::Utf8 { bom: false });

        let semicolon = render(plain, &table);
        let pipe = render(plain.with_delimiter(b'|'), &table);

        assert_eq!(pipe.replace('|', ";"), semicolon);
        assert_eq!(pipe.lines().count(), semicolon.lines().count());
    }

    #[test]
    fn test_comma_delimiter_quotes_prices() {
        let table: ResultTable = vec![ticket("a.pdf")].into_iter().collect();
        let writer = TableWriter::new()
            .with_delimiter(b',')
            .with_encoding(OutputEncoding::Utf8 { bom: false });

        let out = render(writer, &table);
        assert!(out.contains(",\"1.049,90\","));
    }

    #[test]
    fn test_render_is_deterministic() {
        let table: ResultTable = vec![ticket("a.pdf"), TicketRecord::failed("b.pdf", "x")]
            .into_iter()
            .collect();
        let writer = TableWriter::new();
        assert_eq!(writer.render(&table).unwrap(), writer.render(&table).unwrap());
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.csv");

        TableWriter::new().write(&ResultTable::new(), &path).unwrap();
        assert_eq!(
            std::fs::read(&path).unwrap(),
            b"\xEF\xBB\xBFDatei;Datum;Preis;Fahrtart;Start;Ziel\n".to_vec()
        );

        let missing = dir.path().join("no/such/dir/tickets.csv");
        assert!(matches!(
            TableWriter::new().write(&ResultTable::new(), &missing),
            Err(OutputError::Io(_))
        ));
    }
}
