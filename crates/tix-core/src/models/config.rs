//! Configuration structures for ticket extraction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TixError};
use crate::ticket::rules::patterns;

/// Main configuration for a tix run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TixConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Ticket field rules.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider a PDF as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 20,
        }
    }
}

/// A single field rule: a regex plus words that veto a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Regular expression; the field value is read from its capture groups.
    pub pattern: String,

    /// Matches preceded by one of these words (case-insensitive) are skipped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reject_preceding: Vec<String>,
}

impl PatternRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            reject_preceding: Vec::new(),
        }
    }

    /// Skip matches preceded by any of `words`.
    pub fn rejecting(mut self, words: &[&str]) -> Self {
        self.reject_preceding = words.iter().map(|w| (*w).to_string()).collect();
        self
    }
}

/// Ticket field rules, each list tried in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Travel date rules (capture group 1: the date).
    pub date_patterns: Vec<PatternRule>,

    /// Price rules (capture group 1: the amount).
    pub price_patterns: Vec<PatternRule>,

    /// Route line rules (group 1: trip kind, group 2: route part).
    pub route_patterns: Vec<PatternRule>,

    /// Station name endings that mark a plausible split of the route line.
    pub station_suffixes: Vec<String>,

    /// How many characters before a match are checked for rejecting words.
    pub lookbehind_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            date_patterns: vec![
                PatternRule::new(patterns::DATE_TRIP_START),
                PatternRule::new(patterns::DATE_VALIDITY),
                PatternRule::new(patterns::DATE_ANY_AM).rejecting(&["gebucht"]),
            ],
            price_patterns: vec![
                PatternRule::new(patterns::PRICE_TOTAL),
                PatternRule::new(patterns::PRICE_TOTAL_LOOSE),
            ],
            route_patterns: vec![PatternRule::new(patterns::ROUTE_LINE)],
            station_suffixes: patterns::STATION_SUFFIXES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            lookbehind_chars: 30,
        }
    }
}

impl TixConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| TixError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| TixError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
