//! Decode engine: builds a [`Json`] tree from a probeable source.
//!
//! Every position is probed in a fixed priority order and the first probe that
//! answers wins:
//!
//! 1. boolean
//! 2. number
//! 3. string
//! 4. keyed container (object)
//! 5. sequential container (array)
//!
//! Boolean comes strictly before number so a host that exposes `true` as a
//! number-like token never yields `Number(1.0)`.
//!
//! # Null handling
//!
//! A position that answers no probe contributes nothing. Inside an object the
//! key is omitted; inside an array the element is skipped and every later
//! element moves down one index. Only a top-level position that answers no
//! probe is an error ([`JsonError::MalformedInput`]).
//!
//! Two front ends share these rules: [`decode`] walks any [`Source`], and the
//! [`Deserialize`] impl drives a serde `Deserializer` directly so `Json` can be
//! embedded in derived structs. Both enforce a nesting limit; the serde front
//! end always uses [`DEFAULT_MAX_DEPTH`].

use std::fmt;

use serde::de::{
    self, Deserialize, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor,
};
use tracing::{debug, trace};

use crate::error::{JsonError, Result};
use crate::source::{Keyed, Sequential, Source};
use crate::value::{Json, Map};

/// Default nesting limit, matching `serde_json`'s own recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Decoder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested containers. Entering a container at this
    /// depth fails with [`JsonError::DepthLimitExceeded`].
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decode a source into a `Json` tree with default options.
///
/// # Examples
///
/// ```
/// use json_lookup::{decode, Json};
/// use serde_json::json;
///
/// let tree = decode(&json!({"on": true, "n": 1})).unwrap();
/// assert_eq!(tree.get("on"), Some(&Json::Bool(true)));
/// assert_eq!(tree.get("n"), Some(&Json::Number(1.0)));
/// ```
pub fn decode<S: Source>(source: &S) -> Result<Json> {
    decode_with(source, &DecodeOptions::default())
}

/// Decode a source into a `Json` tree.
///
/// Fails with [`JsonError::MalformedInput`] if the top-level position answers
/// no probe, or [`JsonError::DepthLimitExceeded`] if containers nest deeper
/// than `options.max_depth`.
pub fn decode_with<S: Source>(source: &S, options: &DecodeOptions) -> Result<Json> {
    probe(source, 0, options)?.ok_or_else(|| {
        JsonError::MalformedInput(
            "top-level value is not a boolean, number, string, object or array".into(),
        )
    })
}

/// Parse JSON text and decode it with default options.
pub fn from_str(json: &str) -> Result<Json> {
    from_str_with(json, &DecodeOptions::default())
}

/// Parse JSON text and decode it.
pub fn from_str_with(json: &str, options: &DecodeOptions) -> Result<Json> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    decode_with(&value, options)
}

/// Parse UTF-8 JSON bytes and decode them with default options.
pub fn from_slice(json: &[u8]) -> Result<Json> {
    from_slice_with(json, &DecodeOptions::default())
}

/// Parse UTF-8 JSON bytes and decode them.
pub fn from_slice_with(json: &[u8], options: &DecodeOptions) -> Result<Json> {
    let value: serde_json::Value = serde_json::from_slice(json)?;
    decode_with(&value, options)
}

/// Probe one position. `Ok(None)` means no probe answered.
fn probe<S: Source>(source: &S, depth: usize, options: &DecodeOptions) -> Result<Option<Json>> {
    if let Some(b) = source.probe_bool() {
        return Ok(Some(Json::Bool(b)));
    }
    if let Some(n) = source.probe_number() {
        return Ok(Some(Json::Number(n)));
    }
    if let Some(s) = source.probe_str() {
        return Ok(Some(Json::String(s.to_owned())));
    }
    if let Some(entries) = source.probe_keyed() {
        enter(depth, options)?;
        return decode_object(entries, depth + 1, options).map(Some);
    }
    if let Some(items) = source.probe_sequential() {
        enter(depth, options)?;
        return decode_array(items, depth + 1, options).map(Some);
    }
    Ok(None)
}

fn enter(depth: usize, options: &DecodeOptions) -> Result<()> {
    if depth >= options.max_depth {
        debug!(limit = options.max_depth, "decode depth limit reached");
        return Err(JsonError::DepthLimitExceeded {
            limit: options.max_depth,
        });
    }
    Ok(())
}

fn decode_object<S: Source>(
    entries: Keyed<'_, S>,
    depth: usize,
    options: &DecodeOptions,
) -> Result<Json> {
    let mut map = Map::new();
    for (key, child) in entries {
        match probe(child, depth, options)? {
            Some(value) => {
                map.insert(key.to_owned(), value);
            }
            None => trace!(key, "dropping object entry with no decodable value"),
        }
    }
    Ok(Json::Object(map))
}

fn decode_array<S: Source>(
    items: Sequential<'_, S>,
    depth: usize,
    options: &DecodeOptions,
) -> Result<Json> {
    let mut arr = Vec::new();
    for (index, child) in items.enumerate() {
        match probe(child, depth, options)? {
            Some(value) => arr.push(value),
            None => trace!(index, "skipping array element with no decodable value"),
        }
    }
    Ok(Json::Array(arr))
}

// ============================================================================
// serde front end
// ============================================================================

impl<'de> Deserialize<'de> for Json {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        DecodeSeed { depth: 0 }
            .deserialize(deserializer)?
            .ok_or_else(|| de::Error::custom("malformed input: top-level value is null"))
    }
}

/// Deserializes one position at a known nesting depth. `None` means the
/// position answered no probe and the caller drops it.
///
/// The serde front end always uses [`DEFAULT_MAX_DEPTH`]; deserializers such
/// as `&serde_json::Value` have no recursion limit of their own.
#[derive(Clone, Copy)]
struct DecodeSeed {
    depth: usize,
}

impl DecodeSeed {
    fn enter<E: de::Error>(self) -> std::result::Result<DecodeSeed, E> {
        if self.depth >= DEFAULT_MAX_DEPTH {
            debug!(limit = DEFAULT_MAX_DEPTH, "deserialize depth limit reached");
            return Err(E::custom(JsonError::DepthLimitExceeded {
                limit: DEFAULT_MAX_DEPTH,
            }));
        }
        Ok(DecodeSeed {
            depth: self.depth + 1,
        })
    }
}

impl<'de> DeserializeSeed<'de> for DecodeSeed {
    type Value = Option<Json>;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for DecodeSeed {
    type Value = Option<Json>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON boolean, number, string, object or array")
    }

    fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
        Ok(Some(Json::Bool(value)))
    }

    fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
        Ok(Some(Json::Number(value as f64)))
    }

    fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
        Ok(Some(Json::Number(value as f64)))
    }

    fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
        Ok(Some(Json::Number(value)))
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
        Ok(Some(Json::String(value.to_owned())))
    }

    fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
        Ok(Some(Json::String(value)))
    }

    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    // Size hints come from the input (length-prefixed formats), so containers
    // start empty and grow as elements actually arrive.
    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let child = self.enter()?;
        let mut arr = Vec::new();
        let mut index = 0usize;
        while let Some(item) = seq.next_element_seed(child)? {
            match item {
                Some(value) => arr.push(value),
                None => trace!(index, "skipping array element with no decodable value"),
            }
            index += 1;
        }
        Ok(Some(Json::Array(arr)))
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let child = self.enter()?;
        let mut map = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            match access.next_value_seed(child)? {
                Some(value) => {
                    map.insert(key, value);
                }
                None => trace!(key = %key, "dropping object entry with no decodable value"),
            }
        }
        Ok(Some(Json::Object(map)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enter_respects_limit() {
        let options = DecodeOptions::default().with_max_depth(1);
        assert!(enter(0, &options).is_ok());
        assert!(matches!(
            enter(1, &options),
            Err(JsonError::DepthLimitExceeded { limit: 1 })
        ));
    }

    #[test]
    fn probe_reports_nothing_for_null() {
        let options = DecodeOptions::default();
        assert!(probe(&serde_json::Value::Null, 0, &options).unwrap().is_none());
    }

    #[test]
    fn seed_enter_respects_default_limit() {
        let seed = DecodeSeed {
            depth: DEFAULT_MAX_DEPTH - 1,
        };
        let child = seed.enter::<serde_json::Error>().unwrap();
        assert_eq!(child.depth, DEFAULT_MAX_DEPTH);
        assert!(child.enter::<serde_json::Error>().is_err());
    }

    #[test]
    fn scalars_do_not_count_toward_depth() {
        let options = DecodeOptions::default().with_max_depth(1);
        let tree = decode_with(&json!([1, true, "x"]), &options).unwrap();
        assert_eq!(tree.as_array().map(<[Json]>::len), Some(3));
    }
}
