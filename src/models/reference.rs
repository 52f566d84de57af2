//! Worker and building references.
//!
//! Upstream callers hand over references in two shapes with no static
//! guarantee of which: a bare identifier (`"abc123"`, `42`) or an embedded
//! document carrying the identifier under a conventional key
//! (`{"_id": "abc123", "name": "..."}`). Everything past this module sees
//! only the resolved scalar.
//!
//! # Key Precedence
//! Embedded objects are searched for `_id`, then `id`, then `value`, then
//! the extended-JSON `$oid`. Nested values are resolved recursively, so both
//! `{"$oid": "..."}` and `{"_id": {"$oid": "..."}}` resolve.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys searched, in order, on an embedded reference.
const IDENTIFIER_KEYS: [&str; 4] = ["_id", "id", "value", "$oid"];

/// Embedded objects nest at most this deep before resolution gives up.
const MAX_DEPTH: usize = 4;

/// A reference to another entity, in either normalized or denormalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    /// Bare string identifier.
    Scalar(String),
    /// Bare numeric identifier.
    Numeric(i64),
    /// Embedded document carrying an identifier field.
    Embedded(Map<String, Value>),
}

impl Reference {
    /// Creates a scalar reference.
    pub fn scalar(id: impl Into<String>) -> Self {
        Self::Scalar(id.into())
    }

    /// Creates an embedded reference `{ key: id }`.
    pub fn embedded(key: &str, id: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert(key.to_string(), Value::String(id.into()));
        Self::Embedded(map)
    }

    /// Resolves to a scalar identifier, or `None` if nothing usable is present.
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Scalar(s) => non_blank(s),
            Self::Numeric(n) => Some(n.to_string()),
            Self::Embedded(map) => resolve_object(map, 0),
        }
    }
}

impl From<&str> for Reference {
    fn from(id: &str) -> Self {
        Self::Scalar(id.to_string())
    }
}

impl From<i64> for Reference {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<String> for Reference {
    fn from(id: String) -> Self {
        Self::Scalar(id)
    }
}

/// Resolves an arbitrary JSON value to a scalar identifier.
///
/// Strings resolve to themselves (blank strings do not resolve), integers to
/// their decimal text, objects via [`IDENTIFIER_KEYS`]. `null`, booleans,
/// floats and arrays never resolve.
pub fn resolve_identifier(value: &Value) -> Option<String> {
    resolve_at(value, 0)
}

fn resolve_at(value: &Value, depth: usize) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s),
        Value::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_u64().map(|u| u.to_string())),
        Value::Object(map) => resolve_object(map, depth),
        _ => None,
    }
}

fn resolve_object(map: &Map<String, Value>, depth: usize) -> Option<String> {
    if depth >= MAX_DEPTH {
        return None;
    }
    IDENTIFIER_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(|v| resolve_at(v, depth + 1))
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
