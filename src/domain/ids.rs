//! Domain identifier types
//!
//! Newtype wrappers for identifiers that move through the pipeline, so a
//! correlation ID can't be confused with an arbitrary string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Correlation identifier newtype wrapper
///
/// Identifies one submission across the synchronous pipeline and its
/// asynchronous dispatch. Callers may supply their own; when they don't,
/// the core generates a UUID-backed one.
///
/// # Examples
///
/// ```
/// use triage::domain::ids::CorrelationId;
///
/// let id = CorrelationId::new("msg-001").unwrap();
/// assert_eq!(id.as_str(), "msg-001");
///
/// let generated = CorrelationId::generate();
/// assert!(!generated.as_str().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Creates a new CorrelationId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Correlation ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh UUID-backed correlation ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CorrelationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
