//! The `Json` value tree.
//!
//! A closed recursive sum type over the five JSON kinds that survive decoding.
//! There is no null variant: explicit `null`s are dropped by the decoder (see
//! [`decoder`](crate::decoder)). Numbers are always `f64`, integers included.
//!
//! Containers own their children outright (`Vec` / `HashMap`), so a tree is
//! finite and acyclic by construction and can be shared across threads for
//! reading without synchronization.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::JsonError;

/// Object payload. Key order is not significant.
pub type Map = HashMap<String, Json>;

/// A decoded JSON document or fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Json {
    Bool(bool),
    /// Integers and fractions alike.
    Number(f64),
    String(String),
    /// Elements in source order.
    Array(Vec<Json>),
    Object(Map),
}

/// The active variant of a [`Json`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

impl Json {
    /// Which variant this value holds.
    pub fn kind(&self) -> Kind {
        match self {
            Json::Bool(_) => Kind::Bool,
            Json::Number(_) => Kind::Number,
            Json::String(_) => Kind::String,
            Json::Array(_) => Kind::Array,
            Json::Object(_) => Kind::Object,
        }
    }
}

// ============================================================================
// Payload conversions (each payload type maps to exactly one variant)
// ============================================================================

impl From<bool> for Json {
    fn from(value: bool) -> Self {
        Json::Bool(value)
    }
}

impl From<f64> for Json {
    fn from(value: f64) -> Self {
        Json::Number(value)
    }
}

impl From<i32> for Json {
    fn from(value: i32) -> Self {
        Json::Number(f64::from(value))
    }
}

impl From<u32> for Json {
    fn from(value: u32) -> Self {
        Json::Number(f64::from(value))
    }
}

impl From<&str> for Json {
    fn from(value: &str) -> Self {
        Json::String(value.to_owned())
    }
}

impl From<String> for Json {
    fn from(value: String) -> Self {
        Json::String(value)
    }
}

impl From<Vec<Json>> for Json {
    fn from(value: Vec<Json>) -> Self {
        Json::Array(value)
    }
}

impl From<Map> for Json {
    fn from(value: Map) -> Self {
        Json::Object(value)
    }
}

impl FromIterator<Json> for Json {
    fn from_iter<I: IntoIterator<Item = Json>>(iter: I) -> Self {
        Json::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Json)> for Json {
    fn from_iter<I: IntoIterator<Item = (String, Json)>>(iter: I) -> Self {
        Json::Object(iter.into_iter().collect())
    }
}

// ============================================================================
// Text and serde_json interop
// ============================================================================

/// Renders compact JSON. Object key order follows the map's iteration order.
impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for Json {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::decoder::from_str(s)
    }
}

impl From<Json> for serde_json::Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Bool(b) => serde_json::Value::Bool(b),
            // Non-finite numbers have no JSON form.
            Json::Number(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Json::String(s) => serde_json::Value::String(s),
            Json::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Json::Object(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

/// Runs the decode engine over a parsed `serde_json::Value`.
impl TryFrom<&serde_json::Value> for Json {
    type Error = JsonError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        crate::decoder::decode(value)
    }
}
