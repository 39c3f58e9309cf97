//! Rule-based field extractors for ticket texts.

pub mod dates;
pub mod patterns;
pub mod prices;
pub mod route;

pub use dates::{parse_travel_date, DateExtractor};
pub use prices::{format_german_amount, parse_german_amount, PriceExtractor};
pub use route::{split_route, Route, RouteExtractor};

use regex::{Captures, Regex};
use tracing::trace;

use crate::error::ExtractionError;
use crate::models::config::PatternRule;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, or `None` if no rule matches.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// An extracted value and the rule that produced it.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the rule that matched (0 = highest priority).
    pub rule: usize,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: usize) -> Self {
        Self { value, rule }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    regex: Regex,
    reject_preceding: Vec<String>,
}

/// Ordered, compiled rules for one field.
#[derive(Debug, Clone)]
pub struct RuleSet {
    field: &'static str,
    rules: Vec<CompiledRule>,
    lookbehind_chars: usize,
}

impl RuleSet {
    /// Compile `rules`, requiring each to expose at least `groups` capture groups.
    pub fn compile(
        field: &'static str,
        rules: &[PatternRule],
        groups: usize,
        lookbehind_chars: usize,
    ) -> Result<Self, ExtractionError> {
        let compiled = rules
            .iter()
            .map(|rule| {
                let regex = Regex::new(&rule.pattern).map_err(|e| ExtractionError::InvalidPattern {
                    field: field.to_string(),
                    pattern: rule.pattern.clone(),
                    reason: e.to_string(),
                })?;

                // captures_len counts the implicit whole-match group
                if regex.captures_len() < groups + 1 {
                    return Err(ExtractionError::MissingGroup {
                        field: field.to_string(),
                        pattern: rule.pattern.clone(),
                        needed: groups,
                    });
                }

                Ok(CompiledRule {
                    regex,
                    reject_preceding: rule
                        .reject_preceding
                        .iter()
                        .map(|w| w.to_lowercase())
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            field,
            rules: compiled,
            lookbehind_chars,
        })
    }

    /// Name of the field these rules locate.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First accepted match, trying rules in priority order.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<(usize, Captures<'t>)> {
        for (index, rule) in self.rules.iter().enumerate() {
            for caps in rule.regex.captures_iter(text) {
                let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
                if self.is_rejected(rule, text, start) {
                    trace!("{} rule {} rejected match at {}", self.field, index, start);
                    continue;
                }
                return Some((index, caps));
            }
        }
        None
    }

    fn is_rejected(&self, rule: &CompiledRule, text: &str, start: usize) -> bool {
        if rule.reject_preceding.is_empty() {
            return false;
        }

        let window_start = text[..start]
            .char_indices()
            .rev()
            .take(self.lookbehind_chars)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(start);
        let preceding = text[window_start..start].to_lowercase();

        rule.reject_preceding.iter().any(|w| preceding.contains(w.as_str()))
    }
}
