//! Built-in patterns for Deutsche Bahn ticket texts.
//!
//! The field patterns are plain strings so they can be overridden from the
//! configuration file; the helper regexes used while post-processing a
//! match are compiled once here.

use lazy_static::lazy_static;
use regex::Regex;

// Travel date, in priority order.
pub const DATE_TRIP_START: &str = r"(?i)Fahrtantritt\s+am\s+(\d{2}[./\-]\d{2}[./\-]\d{4})";
pub const DATE_VALIDITY: &str =
    r"(?i)Gültigkeit:\s*(\d{2}[./\-]\d{2}[./\-]\d{4})\s*00:00\s*Uhr";
pub const DATE_ANY_AM: &str = r"(?i)\bam\s+(\d{2}[./\-]\d{2}[./\-]\d{4})\b";

// Total price, e.g. "Gesamtpreis 1.234,56 €".
pub const PRICE_TOTAL: &str = r"(?i)Gesamtpreis\s+(\d{1,3}(?:\.\d{3})*,\d{2})\s*€";
pub const PRICE_TOTAL_LOOSE: &str =
    r"(?i)Gesamtpreis:?\s*((?:\d{1,3}(?:[. ]\d{3})+|\d+)[,.]\d{2})\s*(?:€|EUR)";

// Route line: "Einfache Fahrt Berlin Hbf München Hbf". Never crosses a line break.
pub const ROUTE_LINE: &str = r"(?im)^(Einfache[ \t]+Fahrt|Hinfahrt)[ \t]+(.+?)[ \t]*$";

pub const STATION_SUFFIXES: [&str; 5] = ["hbf", "hauptbahnhof", "+city", "city", "bf"];

lazy_static! {
    // Explicit origin/destination separators. A plain hyphen only counts with
    // whitespace on both sides so names like "Baden-Baden" stay intact.
    pub static ref ROUTE_SEPARATOR: Regex = Regex::new(
        r"\s*(?:->|→|–|—|›|>|<)\s*|\s+-\s+"
    ).unwrap();

    // Everything from a "Via" token on.
    pub static ref VIA_SUFFIX: Regex = Regex::new(
        r"(?i)\s*(?:via:|\bvia\b).*$"
    ).unwrap();

    // Text normalization
    pub static ref HORIZONTAL_WHITESPACE: Regex = Regex::new(
        r"[ \t]+"
    ).unwrap();

    pub static ref EXCESS_NEWLINES: Regex = Regex::new(
        r"\n{3,}"
    ).unwrap();

    // DD.MM.YYYY with any of the tolerated separators.
    pub static ref DATE_DMY: Regex = Regex::new(
        r"^(\d{1,2})[./\-](\d{1,2})[./\-](\d{4})$"
    ).unwrap();
}
