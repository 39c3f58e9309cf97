//! Ticket parser combining the per-field rules.

use lazy_static::lazy_static;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::ticket::TicketFields;

use super::rules::{DateExtractor, FieldExtractor, PriceExtractor, RouteExtractor, RuleSet};
use super::TicketExtractor;

lazy_static! {
    static ref DEFAULT_PARSER: TicketParser = TicketParser::from_config(&ExtractionConfig::default())
        .expect("built-in ticket patterns must compile");
}

/// Rule-based parser for Deutsche Bahn ticket texts.
///
/// Every field is located independently; a field whose rules do not match
/// is left absent.
#[derive(Debug, Clone)]
pub struct TicketParser {
    dates: DateExtractor,
    prices: PriceExtractor,
    routes: RouteExtractor,
}

impl TicketParser {
    /// Create a parser with the built-in rules.
    pub fn new() -> Self {
        DEFAULT_PARSER.clone()
    }

    /// Build a parser from configured rules.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        let lookbehind = config.lookbehind_chars;

        let dates = RuleSet::compile("date", &config.date_patterns, 1, lookbehind)?;
        let prices = RuleSet::compile("price", &config.price_patterns, 1, lookbehind)?;
        let routes = RuleSet::compile("route", &config.route_patterns, 2, lookbehind)?;

        debug!(
            "Compiled ticket rules: {} date, {} price, {} route",
            dates.len(),
            prices.len(),
            routes.len()
        );
        for set in [&dates, &prices, &routes] {
            if set.is_empty() {
                warn!("No {} rules configured, that field will stay empty", set.field());
            }
        }

        Ok(Self {
            dates: DateExtractor::new(dates),
            prices: PriceExtractor::new(prices),
            routes: RouteExtractor::new(routes, &config.station_suffixes),
        })
    }
}

impl Default for TicketParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketExtractor for TicketParser {
    fn extract(&self, text: &str) -> TicketFields {
        let mut fields = TicketFields::default();

        if let Some(found) = self.dates.extract(text) {
            debug!("date {} via rule {}", found.value, found.rule);
            fields.date = Some(found.value);
        }

        if let Some(found) = self.prices.extract(text) {
            debug!("price {} via rule {}", found.value, found.rule);
            fields.price = Some(found.value);
        }

        if let Some(found) = self.routes.extract(text) {
            debug!(
                "route {:?} -> {:?} via rule {}",
                found.value.origin, found.value.destination, found.rule
            );
            fields.trip_kind = Some(found.value.kind);
            fields.origin = found.value.origin;
            fields.destination = found.value.destination;
        }

        let missing = fields.missing();
        if !missing.is_empty() {
            debug!(
                "unresolved fields: {}",
                missing.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", ")
            );
        }

        fields
    }
}
