//! Output text encodings.

use std::fmt;
use std::str::FromStr;

use encoding_rs::{Encoding, UTF_8};

use crate::error::OutputError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding of the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    /// UTF-8, optionally prefixed with a byte-order mark (`utf-8-sig`).
    Utf8 { bom: bool },
    /// Any other encoding `encoding_rs` can produce (e.g. `windows-1252`).
    Other(&'static Encoding),
}

impl Default for OutputEncoding {
    /// UTF-8 with BOM, which spreadsheet applications detect reliably.
    fn default() -> Self {
        OutputEncoding::Utf8 { bom: true }
    }
}

impl OutputEncoding {
    /// Encode `text`, failing on characters the encoding cannot represent.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, OutputError> {
        match *self {
            OutputEncoding::Utf8 { bom } => {
                let mut bytes = Vec::with_capacity(text.len() + UTF8_BOM.len());
                if bom {
                    bytes.extend_from_slice(UTF8_BOM);
                }
                bytes.extend_from_slice(text.as_bytes());
                Ok(bytes)
            }
            OutputEncoding::Other(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(text);
                if had_errors {
                    let mut buf = [0u8; 4];
                    let ch = text
                        .chars()
                        .find(|c| encoding.encode(c.encode_utf8(&mut buf)).2)
                        .unwrap_or(char::REPLACEMENT_CHARACTER);
                    return Err(OutputError::Unmappable {
                        encoding: encoding.name().to_string(),
                        ch,
                    });
                }
                Ok(bytes.into_owned())
            }
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = OutputError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let normalized = label.trim().to_lowercase().replace('_', "-");

        if matches!(normalized.as_str(), "utf-8-sig" | "utf8-sig") {
            return Ok(OutputEncoding::Utf8 { bom: true });
        }

        let encoding = Encoding::for_label(normalized.as_bytes())
            .ok_or_else(|| OutputError::UnknownEncoding(label.to_string()))?;

        if encoding == UTF_8 {
            return Ok(OutputEncoding::Utf8 { bom: false });
        }

        // UTF-16 and "replacement" have no encoder of their own
        if encoding.output_encoding() != encoding {
            return Err(OutputError::UnsupportedEncoding(encoding.name().to_string()));
        }

        Ok(OutputEncoding::Other(encoding))
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OutputEncoding::Utf8 { bom: true } => f.write_str("utf-8-sig"),
            OutputEncoding::Utf8 { bom: false } => f.write_str("utf-8"),
            OutputEncoding::Other(encoding) => f.write_str(&encoding.name().to_lowercase()),
        }
    }
}
