//! Response extraction — recovers the recommendation array from a Gemini envelope.
//!
//! Two strategies run in order behind `ExtractionStrategy`:
//! 1. `StrictEnvelope`: navigate to `candidates[0].content.parts[0].text`, trim,
//!    strip a Markdown fence if present, parse as a JSON array.
//! 2. `ScanFallback`: take the first `[` through the last `]` (across newlines)
//!    of the model text (or of the whole serialized envelope when the text
//!    cannot be located) and parse that.
//!
//! A schema-enforcing provider mode can replace both by swapping the chain.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

static JSON_ARRAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid JSON array pattern"));

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No valid response from Gemini")]
    MissingText,

    #[error("No JSON found in Gemini response")]
    NoJsonFound,

    #[error("Could not extract valid JSON from response")]
    InvalidJson,
}

pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, envelope: &Value) -> Result<Vec<Value>, ExtractionError>;
}

/// Strict parse of the envelope's text payload.
pub struct StrictEnvelope;

impl ExtractionStrategy for StrictEnvelope {
    fn name(&self) -> &'static str {
        "strict-envelope"
    }

    fn extract(&self, envelope: &Value) -> Result<Vec<Value>, ExtractionError> {
        let text = envelope_text(envelope).ok_or(ExtractionError::MissingText)?;
        parse_array(strip_json_fences(text))
    }
}

/// Greedy array scan over the model text, or the serialized envelope.
pub struct ScanFallback;

impl ExtractionStrategy for ScanFallback {
    fn name(&self) -> &'static str {
        "scan-fallback"
    }

    fn extract(&self, envelope: &Value) -> Result<Vec<Value>, ExtractionError> {
        let haystack = match envelope_text(envelope) {
            Some(text) => text.to_string(),
            None => envelope.to_string(),
        };

        let candidate = JSON_ARRAY_PATTERN
            .find(&haystack)
            .ok_or(ExtractionError::NoJsonFound)?;

        parse_array(candidate.as_str())
    }
}

/// Ordered chain of extraction strategies; the first success wins.
pub struct ResponseExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self {
            strategies: vec![Box::new(StrictEnvelope), Box::new(ScanFallback)],
        }
    }
}

impl ResponseExtractor {
    /// Returns the error of the last strategy tried when all fail.
    pub fn extract(&self, envelope: &Value) -> Result<Vec<Value>, ExtractionError> {
        let mut last_error = ExtractionError::NoJsonFound;

        for strategy in &self.strategies {
            match strategy.extract(envelope) {
                Ok(items) => return Ok(items),
                Err(e) => {
                    warn!("Extraction strategy '{}' failed: {e}", strategy.name());
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

/// Extracts recommendations with the default strict-then-scan chain.
pub fn extract_recommendations(envelope: &Value) -> Result<Vec<Value>, ExtractionError> {
    ResponseExtractor::default().extract(envelope)
}

fn envelope_text(envelope: &Value) -> Option<&str> {
    envelope
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

fn parse_array(text: &str) -> Result<Vec<Value>, ExtractionError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Ok(items),
        _ => Err(ExtractionError::InvalidJson),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped)
}
