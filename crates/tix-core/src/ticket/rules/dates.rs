//! Travel date extraction.

use chrono::NaiveDate;
use tracing::trace;

use super::patterns::DATE_DMY;
use super::{ExtractionMatch, FieldExtractor, RuleSet};
use crate::models::ticket::TravelDate;

/// Travel date extractor.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    rules: RuleSet,
}

impl DateExtractor {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<TravelDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let (rule, caps) = self.rules.first_match(text)?;
        let token = caps.get(1)?;
        let full_match = caps.get(0)?;

        trace!("date rule {} matched {:?}", rule, full_match.as_str());

        Some(ExtractionMatch::new(parse_travel_date(token.as_str()), rule))
    }
}

/// Parse a `DD.MM.YYYY` token (also `/` or `-` separated).
///
/// Tokens that are not valid calendar dates are kept verbatim.
pub fn parse_travel_date(token: &str) -> TravelDate {
    let token = token.trim();

    DATE_DMY
        .captures(token)
        .and_then(|caps| {
            let day: u32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let year: i32 = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .map(TravelDate::Parsed)
        .unwrap_or_else(|| TravelDate::Raw(token.to_string()))
}
