//! Identifier types used across the dashboard engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TraitError;

/// Ticker symbol, trimmed and upper-cased.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol, normalizing case and surrounding whitespace.
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(symbol.as_ref().trim().to_ascii_uppercase())
    }

    /// Create a symbol, rejecting blank input.
    pub fn parse(symbol: &str) -> Result<Self, TraitError> {
        let s = Self::new(symbol);
        if s.0.is_empty() {
            return Err(TraitError::InvalidInput("symbol must not be blank".into()));
        }
        Ok(s)
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
