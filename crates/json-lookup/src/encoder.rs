//! Encode engine: writes a [`Json`] tree into any serde `Serializer`.
//!
//! The walk is the structural inverse of decoding:
//!
//! - **Scalars**: one `serialize_bool` / `serialize_i64` / `serialize_f64` /
//!   `serialize_str` call
//! - **Arrays**: a sequence with every element in order
//! - **Objects**: a map with every entry, in the map's iteration order unless
//!   [`EncodeOptions::sort_keys`] is set
//!
//! Sink errors are returned untouched. Formatting choices travel in an
//! explicit [`EncodeOptions`] argument.
//!
//! # Example
//! ```
//! use json_lookup::{from_str, to_string_with, EncodeOptions};
//!
//! let tree = from_str(r#"{"b":[1,2.5],"a":true}"#).unwrap();
//! let text = to_string_with(&tree, &EncodeOptions::default().with_sort_keys(true)).unwrap();
//! assert_eq!(text, r#"{"a":true,"b":[1,2.5]}"#);
//! ```

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::Result;
use crate::value::{Json, Map};

/// Integral values up to this magnitude are written as JSON integers.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Encoder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Indented, multi-line output (string/byte helpers only).
    pub pretty: bool,
    /// Emit object keys in lexicographic order.
    pub sort_keys: bool,
}

impl EncodeOptions {
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }
}

/// A tree paired with the options to encode it under.
struct Encoded<'a> {
    json: &'a Json,
    options: &'a EncodeOptions,
}

impl<'a> Encoded<'a> {
    fn child(&self, json: &'a Json) -> Self {
        Encoded {
            json,
            options: self.options,
        }
    }
}

impl Serialize for Encoded<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.json {
            Json::Bool(b) => serializer.serialize_bool(*b),
            Json::Number(n) => serialize_number(*n, serializer),
            Json::String(s) => serializer.serialize_str(s),
            Json::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            Json::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in entries(map, self.options.sort_keys) {
                    out.serialize_entry(key, &self.child(value))?;
                }
                out.end()
            }
        }
    }
}

/// Serializes with default options: compact, unordered keys.
impl Serialize for Json {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode(self, serializer)
    }
}

/// Write `json` into `sink` with default options.
pub fn encode<S: Serializer>(json: &Json, sink: S) -> std::result::Result<S::Ok, S::Error> {
    encode_with(json, sink, &EncodeOptions::default())
}

/// Write `json` into `sink`. `options.pretty` is a property of the sink and is
/// ignored here; configure the serializer instead.
pub fn encode_with<S: Serializer>(
    json: &Json,
    sink: S,
    options: &EncodeOptions,
) -> std::result::Result<S::Ok, S::Error> {
    Encoded { json, options }.serialize(sink)
}

/// Compact JSON text.
pub fn to_string(json: &Json) -> Result<String> {
    to_string_with(json, &EncodeOptions::default())
}

/// Indented JSON text.
pub fn to_string_pretty(json: &Json) -> Result<String> {
    to_string_with(json, &EncodeOptions::default().with_pretty(true))
}

/// JSON text under the given options.
pub fn to_string_with(json: &Json, options: &EncodeOptions) -> Result<String> {
    let encoded = Encoded { json, options };
    let text = if options.pretty {
        serde_json::to_string_pretty(&encoded)?
    } else {
        serde_json::to_string(&encoded)?
    };
    Ok(text)
}

/// UTF-8 JSON bytes under the given options.
pub fn to_vec_with(json: &Json, options: &EncodeOptions) -> Result<Vec<u8>> {
    let encoded = Encoded { json, options };
    let bytes = if options.pretty {
        serde_json::to_vec_pretty(&encoded)?
    } else {
        serde_json::to_vec(&encoded)?
    };
    Ok(bytes)
}

/// Integral values in the exactly-representable range go out as `i64` so
/// `44` stays `44` instead of `44.0`. Everything else is an `f64`.
fn serialize_number<S: Serializer>(n: f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if is_safe_integer(n) {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

fn is_safe_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER
}

fn entries(map: &Map, sorted: bool) -> Vec<(&String, &Json)> {
    let mut entries: Vec<_> = map.iter().collect();
    if sorted {
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    }
    entries
}
