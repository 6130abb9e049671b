//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Agreement identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors. Serializes transparently because ids cross
/// the store boundary as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConvenioId(String);

impl ConvenioId {
    /// Create a new ConvenioId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConvenioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ConvenioId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ConvenioId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Publication identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicacionId(String);

impl PublicacionId {
    /// Create a new PublicacionId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicacionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PublicacionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PublicacionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
