/// Decode engine contract tests.
///
/// Covers probe priority (boolean before number), null dropping inside
/// containers, top-level rejection, the depth guard, and parity between the
/// `Source` front end and the serde `Deserialize` front end.
use json_lookup::source::{Keyed, Sequential};
use json_lookup::decoder::DEFAULT_MAX_DEPTH;
use json_lookup::{
    decode, decode_with, from_slice, from_slice_with, from_str, DecodeOptions, Json, JsonError,
    Source,
};
use serde::de::value::{Error as ValueError, MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{DeserializeSeed, MapAccess, SeqAccess};
use serde::Deserialize;
use serde_json::{json, Value};

/// `depth` arrays wrapped around a single number.
fn nested_arrays(depth: usize) -> Value {
    let mut value = json!(1);
    for _ in 0..depth {
        value = Value::Array(vec![value]);
    }
    value
}

fn assert_num(json: &Json, expected: f64) {
    assert_eq!(json.as_f64(), Some(expected), "expected number {expected}, got {json:?}");
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn decode_true() {
    let json = from_str("true").unwrap();
    assert_eq!(json, Json::Bool(true));
}

#[test]
fn decode_false() {
    let json = from_str("false").unwrap();
    assert_eq!(json, Json::Bool(false));
}

#[test]
fn decode_integer() {
    assert_num(&from_str("44").unwrap(), 44.0);
}

#[test]
fn decode_negative_integer() {
    assert_num(&from_str("-7").unwrap(), -7.0);
}

#[test]
fn decode_float() {
    assert_num(&from_str("5.55").unwrap(), 5.55);
}

#[test]
fn decode_exponent() {
    assert_num(&from_str("1.5e3").unwrap(), 1500.0);
}

#[test]
fn decode_string() {
    let json = from_str(r#""hello""#).unwrap();
    assert_eq!(json.as_str(), Some("hello"));
}

#[test]
fn decode_escaped_string() {
    let json = from_str(r#""such json\nwow""#).unwrap();
    assert_eq!(json.as_str(), Some("such json\nwow"));
}

#[test]
fn decode_bytes() {
    let json = from_slice(br#"{"a":[1]}"#).unwrap();
    assert_eq!(json.get("a").and_then(|a| a.get(0)), Some(&Json::Number(1.0)));
}

#[test]
fn decode_bytes_with_options() {
    let options = DecodeOptions::default().with_max_depth(1);
    assert!(from_slice_with(b"[1,2]", &options).is_ok());
    let err = from_slice_with(b"[[1]]", &options).unwrap_err();
    assert!(matches!(err, JsonError::DepthLimitExceeded { limit: 1 }), "got {err:?}");
}

// ============================================================================
// Disambiguation
// ============================================================================

#[test]
fn booleans_never_become_numbers() {
    let json = from_str(r#"{"t":true,"f":false}"#).unwrap();
    for key in ["t", "f"] {
        let value = json.get(key).unwrap();
        assert!(value.is_bool());
        assert_eq!(value.as_f64(), None);
        assert_eq!(value.as_i64(), None);
    }
}

#[test]
fn zero_and_one_are_numbers_not_booleans() {
    let json = from_str(r#"{"key3":0.0,"key5":0,"one":1}"#).unwrap();
    for key in ["key3", "key5", "one"] {
        let value = json.get(key).unwrap();
        assert!(value.is_number(), "{key} should be a number");
        assert_eq!(value.as_bool(), None);
    }
}

#[test]
fn numeric_strings_stay_strings() {
    let json = from_str(r#"["42","true"]"#).unwrap();
    assert_eq!(json.get(0).and_then(Json::as_str), Some("42"));
    assert_eq!(json.get(1).and_then(Json::as_str), Some("true"));
}

/// A host that exposes booleans as 0/1 numbers as well as booleans.
enum Loose {
    Flag(bool),
    Num(f64),
    List(Vec<Loose>),
}

impl Source for Loose {
    fn probe_bool(&self) -> Option<bool> {
        match self {
            Loose::Flag(b) => Some(*b),
            _ => None,
        }
    }

    fn probe_number(&self) -> Option<f64> {
        match self {
            Loose::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            Loose::Num(n) => Some(*n),
            _ => None,
        }
    }

    fn probe_str(&self) -> Option<&str> {
        None
    }

    fn probe_keyed(&self) -> Option<Keyed<'_, Self>> {
        None
    }

    fn probe_sequential(&self) -> Option<Sequential<'_, Self>> {
        match self {
            Loose::List(items) => Some(Box::new(items.iter())),
            _ => None,
        }
    }
}

#[test]
fn boolean_probe_wins_over_overlapping_number_probe() {
    let source = Loose::List(vec![Loose::Flag(true), Loose::Num(1.0), Loose::Flag(false)]);
    let json = decode(&source).unwrap();
    assert_eq!(
        json,
        Json::Array(vec![Json::Bool(true), Json::Number(1.0), Json::Bool(false)])
    );
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn decode_nested_object() {
    let json = from_str(r#"{"sys":{"id":"abc"}}"#).unwrap();
    let id = json.get("sys").and_then(|sys| sys.get("id"));
    assert_eq!(id.and_then(Json::as_str), Some("abc"));
}

#[test]
fn decode_mixed_array_in_order() {
    let json = from_str(r#"{"key6":[false,"hello",45]}"#).unwrap();
    let arr = json.get("key6").unwrap();
    assert_eq!(arr.get(0), Some(&Json::Bool(false)));
    assert_eq!(arr.get(1), Some(&Json::String("hello".into())));
    assert_eq!(arr.get(2), Some(&Json::Number(45.0)));
    assert_eq!(arr.get(3), None);
}

#[test]
fn empty_array_is_present() {
    let json = from_str(r#"{"key7":[]}"#).unwrap();
    let arr = json.get("key7").expect("empty array must not be dropped");
    assert_eq!(arr.as_array().map(<[Json]>::len), Some(0));
}

#[test]
fn empty_object_is_present() {
    let json = from_str(r#"{"meta":{}}"#).unwrap();
    assert_eq!(json.get("meta").and_then(Json::len), Some(0));
}

#[test]
fn array_of_arrays() {
    let json = from_str("[[1,2],[],[[true]]]").unwrap();
    assert_eq!(json.get(0).and_then(|a| a.get(1)), Some(&Json::Number(2.0)));
    assert_eq!(json.get(1).and_then(Json::len), Some(0));
    let inner = json.get(2).and_then(|a| a.get(0)).and_then(|a| a.get(0));
    assert_eq!(inner, Some(&Json::Bool(true)));
}

#[test]
fn duplicate_keys_keep_last() {
    let json = from_str(r#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(json.get("a"), Some(&Json::Number(2.0)));
}

// ============================================================================
// Nulls
// ============================================================================

#[test]
fn null_object_value_is_omitted() {
    let json = from_str(r#"{"a":null,"b":1}"#).unwrap();
    assert_eq!(json.get("a"), None);
    assert_eq!(json.len(), Some(1));
}

#[test]
fn null_array_element_is_skipped_and_indices_shift() {
    let json = from_str(r#"[1,null,3]"#).unwrap();
    assert_eq!(json.len(), Some(2));
    assert_eq!(json.get(1), Some(&Json::Number(3.0)));
}

#[test]
fn top_level_null_is_malformed() {
    let err = from_str("null").unwrap_err();
    assert!(matches!(err, JsonError::MalformedInput(_)), "got {err:?}");
}

#[test]
fn invalid_text_is_a_serde_error() {
    let err = from_str(r#"{"a":"#).unwrap_err();
    assert!(matches!(err, JsonError::Serde(_)), "got {err:?}");
}

// ============================================================================
// Depth guard
// ============================================================================

#[test]
fn depth_within_limit_decodes() {
    let options = DecodeOptions::default().with_max_depth(2);
    let json = decode_with(&json!([[1]]), &options).unwrap();
    assert_eq!(json.get(0).and_then(|a| a.get(0)), Some(&Json::Number(1.0)));
}

#[test]
fn depth_over_limit_fails() {
    let options = DecodeOptions::default().with_max_depth(2);
    let err = decode_with(&json!([[[1]]]), &options).unwrap_err();
    assert!(matches!(err, JsonError::DepthLimitExceeded { limit: 2 }), "got {err:?}");
}

#[test]
fn deserialize_within_default_depth() {
    let value = nested_arrays(DEFAULT_MAX_DEPTH);
    assert!(Json::deserialize(&value).is_ok());
}

#[test]
fn deserialize_over_default_depth_fails() {
    let value = nested_arrays(300);
    assert!(decode(&value).is_err());
    let err = Json::deserialize(&value).unwrap_err();
    assert!(err.to_string().contains("Nesting depth exceeds limit of 128"), "got {err}");
}

#[test]
fn zero_depth_still_allows_scalars() {
    let options = DecodeOptions::default().with_max_depth(0);
    assert_eq!(decode_with(&json!("x"), &options).unwrap(), Json::from("x"));
    assert!(decode_with(&json!({}), &options).is_err());
}

// ============================================================================
// serde front end
// ============================================================================

#[test]
fn deserialize_matches_source_decode() {
    let text = r#"{"a":[true,0,null,"s",{"b":null,"c":2.5}],"d":null}"#;
    let via_source = from_str(text).unwrap();
    let via_serde: Json = serde_json::from_str(text).unwrap();
    assert_eq!(via_source, via_serde);
}

#[test]
fn deserialize_rejects_top_level_null() {
    assert!(serde_json::from_str::<Json>("null").is_err());
}

#[test]
fn deserialize_embedded_in_struct() {
    #[derive(serde::Deserialize)]
    struct Envelope {
        kind: String,
        payload: Json,
    }

    let env: Envelope =
        serde_json::from_str(r#"{"kind":"entry","payload":{"n":3,"gone":null}}"#).unwrap();
    assert_eq!(env.kind, "entry");
    assert_eq!(env.payload.get("n"), Some(&Json::Number(3.0)));
    assert_eq!(env.payload.get("gone"), None);
}

#[test]
fn decoded_tree_is_its_own_source() {
    let json = from_str(r#"{"a":[1,{"b":"c"}]}"#).unwrap();
    assert_eq!(decode(&json).unwrap(), json);
}

#[test]
fn try_from_serde_value() {
    let value = json!({"x": [false]});
    let json = Json::try_from(&value).unwrap();
    assert_eq!(json.cursor().member("x").get(0).as_bool(), Some(false));
}

/// Claims a huge length up front but yields nothing.
struct Overstated;

impl<'de> SeqAccess<'de> for Overstated {
    type Error = ValueError;

    fn next_element_seed<T>(&mut self, _seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        Ok(None)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(usize::MAX / 8)
    }
}

impl<'de> MapAccess<'de> for Overstated {
    type Error = ValueError;

    fn next_key_seed<K>(&mut self, _seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, _seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        Err(serde::de::Error::custom("no value"))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(usize::MAX / 8)
    }
}

#[test]
fn deserialize_ignores_overstated_sequence_length() {
    let json = Json::deserialize(SeqAccessDeserializer::new(Overstated)).unwrap();
    assert_eq!(json, Json::Array(Vec::new()));
}

#[test]
fn deserialize_ignores_overstated_map_length() {
    let json = Json::deserialize(MapAccessDeserializer::new(Overstated)).unwrap();
    assert_eq!(json.len(), Some(0));
    assert!(json.is_object());
}
