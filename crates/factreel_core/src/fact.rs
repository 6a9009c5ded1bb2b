//! Seed fact type.

use serde::{Deserialize, Serialize};

/// A short factual statement that seeds one pipeline run.
///
/// # Examples
///
/// ```
/// use factreel_core::Fact;
///
/// let fact = Fact::from("Octopuses have three hearts.");
/// assert_eq!(fact.as_str(), "Octopuses have three hearts.");
/// assert_eq!(fact.to_string(), "Octopuses have three hearts.");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Fact(String);

impl Fact {
    /// Create a fact from any string-like value.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the fact text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the fact has no visible content.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Consume the fact, returning the text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for Fact {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}
