//! Route (origin / destination) extraction.
//!
//! DB tickets print the route on a single line after the trip kind, e.g.
//! `Einfache Fahrt Berlin Hbf München Hbf`, usually without any separator
//! between the two stations. Explicit separators are honoured when present;
//! otherwise the split point is chosen by scoring every token boundary.

use tracing::trace;

use super::patterns::{ROUTE_SEPARATOR, VIA_SUFFIX};
use super::{ExtractionMatch, FieldExtractor, RuleSet};

/// Route found on a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Trip kind keyword (`Einfache Fahrt`, `Hinfahrt`).
    pub kind: String,
    /// Departure station.
    pub origin: Option<String>,
    /// Arrival station.
    pub destination: Option<String>,
}

/// Route field extractor.
#[derive(Debug, Clone)]
pub struct RouteExtractor {
    rules: RuleSet,
    station_suffixes: Vec<String>,
}

impl RouteExtractor {
    pub fn new(rules: RuleSet, station_suffixes: &[String]) -> Self {
        Self {
            rules,
            station_suffixes: station_suffixes.iter().map(|s| s.to_lowercase()).collect(),
        }
    }
}

impl FieldExtractor for RouteExtractor {
    type Output = ExtractionMatch<Route>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let (rule, caps) = self.rules.first_match(text)?;
        let full_match = caps.get(0)?;
        let kind = caps.get(1)?.as_str().trim().to_string();
        let route_part = caps.get(2)?.as_str();

        trace!("route rule {} matched {:?}", rule, full_match.as_str());

        let (origin, destination) = split_route(route_part, &self.station_suffixes);

        Some(ExtractionMatch::new(
            Route {
                kind,
                origin,
                destination,
            },
            rule,
        ))
    }
}

/// Split the route part of the route line into origin and destination.
///
/// `station_suffixes` must be lowercase.
pub fn split_route(route_part: &str, station_suffixes: &[String]) -> (Option<String>, Option<String>) {
    let without_via = VIA_SUFFIX.replace(route_part.trim(), "");
    let route_part = without_via.trim();

    if route_part.is_empty() {
        return (None, None);
    }

    let parts: Vec<&str> = ROUTE_SEPARATOR.splitn(route_part, 2).map(str::trim).collect();
    if let [origin, destination] = parts.as_slice() {
        if !origin.is_empty() && !destination.is_empty() {
            return (Some(origin.to_string()), Some(destination.to_string()));
        }
    }

    let tokens: Vec<&str> = route_part.split_whitespace().collect();
    if tokens.len() < 2 {
        return (Some(route_part.to_string()), None);
    }

    let mut best: Option<(String, String)> = None;
    let mut best_score = i32::MIN;

    for k in 1..tokens.len() {
        let origin = tokens[..k].join(" ");
        let destination = tokens[k..].join(" ");

        let score = score_side(&origin, station_suffixes) + score_side(&destination, station_suffixes)
            - if origin.contains(':') || destination.contains(':') { 3 } else { 0 };

        // first split wins on ties
        if score > best_score {
            best_score = score;
            best = Some((origin, destination));
        }
    }

    match best {
        Some((origin, destination)) => (Some(origin), Some(destination)),
        None => (Some(route_part.to_string()), None),
    }
}

fn score_side(side: &str, station_suffixes: &[String]) -> i32 {
    let lower = side.trim().to_lowercase();
    let mut score = 0;

    if station_suffixes.iter().any(|s| lower.ends_with(s.as_str())) {
        score += 3;
    }
    if side.chars().any(char::is_alphabetic) {
        score += 1;
    }
    if (3..=80).contains(&side.chars().count()) {
        score += 1;
    }

    score
}
