//! Shared newtypes used across domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;

// ─── AreaKey ─────────────────────────────────────────────────────────────────

/// Key of one area inside a comparison result (e.g. `"wakad"`).
///
/// Keys are unique within a comparison and address that area's chart toggle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AreaKey(String);

impl AreaKey {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AreaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AreaKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AreaKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for AreaKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for AreaKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AreaKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AreaKey(s))
    }
}
