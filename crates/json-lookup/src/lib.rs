//! # json-lookup
//!
//! A self-describing JSON value for loosely typed documents.
//!
//! [`Json`] decodes any JSON document into one closed type without a
//! caller-defined schema, re-encodes it through any serde `Serializer`, and
//! answers typed questions about it with accessors that never panic.
//!
//! ## Quick start
//!
//! ```rust
//! use json_lookup::from_str;
//!
//! let doc = from_str(r#"{"key1":true,"key2":44,"key4":5.55,"sys":{"id":"abc"}}"#).unwrap();
//!
//! assert_eq!(doc.cursor().member("key1").as_bool(), Some(true));
//! assert_eq!(doc.cursor().member("key2").as_i64(), Some(44));
//! assert_eq!(doc.cursor().member("key4").as_i64(), Some(5));
//! assert_eq!(doc.cursor().member("key4").as_bool(), None);
//! assert_eq!(doc.cursor().member("sys").member("id").as_str(), Some("abc"));
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the `Json` tree
//! - [`source`]: probeable input sources (`serde_json::Value` adapter)
//! - [`decoder`]: source / text → `Json`, with boolean-before-number disambiguation
//! - [`encoder`]: `Json` → any serde `Serializer` / JSON text
//! - [`access`]: typed projections, indexing, member lookup, `Cursor`
//! - [`error`]: error type for decode/encode failures
//!
//! ## Nulls
//!
//! There is no null variant. An explicit `null` object value is omitted and a
//! `null` array element is skipped (shifting later indices). A top-level
//! `null` is rejected as malformed input.

pub mod access;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod source;
pub mod value;

pub use access::{Cursor, Index, Segment};
pub use decoder::{
    decode, decode_with, from_slice, from_slice_with, from_str, from_str_with, DecodeOptions,
};
pub use encoder::{
    encode, encode_with, to_string, to_string_pretty, to_string_with, to_vec_with, EncodeOptions,
};
pub use error::JsonError;
pub use source::Source;
pub use value::{Json, Kind, Map};
