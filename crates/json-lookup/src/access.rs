//! Accessors: typed projections, indexing, and dynamic member lookup.
//!
//! Nothing here coerces across variants or panics. A wrong variant, a missing
//! key, or an out-of-range index all come back as `None`, so lookups can be
//! chained with `?` or [`Option::and_then`] without guarding each step.
//!
//! ```
//! use json_lookup::from_str;
//!
//! let doc = from_str(r#"{"sys":{"id":"abc","tags":["x","y"]}}"#).unwrap();
//! assert_eq!(doc.cursor().member("sys").member("id").as_str(), Some("abc"));
//! assert_eq!(doc.cursor().member("sys").member("tags").get(1).as_str(), Some("y"));
//! assert_eq!(doc.cursor().member("nope").member("id").as_str(), None);
//! ```

use crate::value::{Json, Map};

impl Json {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Json::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Json::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The number truncated toward zero (`5.55` → `5`, `-5.55` → `-5`).
    /// Out-of-range values saturate at the `i64` bounds and NaN yields `0`.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64().map(|n| n as i64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Json::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Json]> {
        match self {
            Json::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Json::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Json::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Json::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Json::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Json::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Json::Object(_))
    }

    /// Number of elements or entries; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Json::Array(items) => Some(items.len()),
            Json::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Whether a container has no elements or entries; `None` for scalars.
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|n| n == 0)
    }

    /// Positional (`usize`) or keyed (`&str`, `String`) lookup.
    ///
    /// A position only hits an array and a key only hits an object.
    ///
    /// ```
    /// use json_lookup::{from_str, Json};
    ///
    /// let doc = from_str(r#"{"key6":[false,"hello",45]}"#).unwrap();
    /// let arr = doc.get("key6").unwrap();
    /// assert_eq!(arr.get(0), Some(&Json::Bool(false)));
    /// assert_eq!(arr.get(3), None);
    /// assert_eq!(doc.get(0), None);
    /// ```
    pub fn get<I: Index>(&self, index: I) -> Option<&Json> {
        index.index_into(self)
    }

    /// Dynamic member lookup, dispatched on this value's variant:
    ///
    /// - object: the child stored under `name`
    /// - array: the array itself, `name` ignored, so a positional step can follow
    /// - scalar: the scalar itself, `name` ignored, for a terminal `as_*` call
    ///
    /// The name is only checked at object hops, so a wrong path is noticed at
    /// the first object that lacks the key and not before.
    pub fn member(&self, name: &str) -> Option<&Json> {
        match self {
            Json::Object(map) => map.get(name),
            Json::Array(_) | Json::Bool(_) | Json::Number(_) | Json::String(_) => Some(self),
        }
    }

    /// Start a lookup chain at this value.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor(Some(self))
    }

    /// Follow a sequence of member and positional steps.
    ///
    /// ```
    /// use json_lookup::{from_str, Segment};
    ///
    /// let doc = from_str(r#"{"items":[{"name":"a"},{"name":"b"}]}"#).unwrap();
    /// let path = [Segment::from("items"), Segment::from(1), Segment::from("name")];
    /// assert_eq!(doc.lookup(path).and_then(|v| v.as_str()), Some("b"));
    /// ```
    pub fn lookup<'a, I>(&self, path: I) -> Option<&Json>
    where
        I: IntoIterator<Item = Segment<'a>>,
    {
        path.into_iter()
            .try_fold(self, |node, segment| match segment {
                Segment::Key(name) => node.member(name),
                Segment::Index(i) => node.get(i),
            })
    }
}

/// One step of a [`Json::lookup`] path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A [`Json::member`] step.
    Key(&'a str),
    /// A positional [`Json::get`] step.
    Index(usize),
}

impl<'a> From<&'a str> for Segment<'a> {
    fn from(name: &'a str) -> Self {
        Segment::Key(name)
    }
}

impl From<usize> for Segment<'_> {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// A lookup chain in progress. Once a step misses, every later step misses too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor<'a>(Option<&'a Json>);

impl<'a> Cursor<'a> {
    pub fn member(self, name: &str) -> Self {
        Cursor(self.0.and_then(|node| node.member(name)))
    }

    pub fn get<I: Index>(self, index: I) -> Self {
        Cursor(self.0.and_then(|node| node.get(index)))
    }

    /// The node reached, if every step hit.
    pub fn value(self) -> Option<&'a Json> {
        self.0
    }

    pub fn as_bool(self) -> Option<bool> {
        self.0.and_then(Json::as_bool)
    }

    pub fn as_f64(self) -> Option<f64> {
        self.0.and_then(Json::as_f64)
    }

    pub fn as_i64(self) -> Option<i64> {
        self.0.and_then(Json::as_i64)
    }

    pub fn as_str(self) -> Option<&'a str> {
        self.0.and_then(Json::as_str)
    }

    pub fn as_array(self) -> Option<&'a [Json]> {
        self.0.and_then(Json::as_array)
    }

    pub fn as_object(self) -> Option<&'a Map> {
        self.0.and_then(Json::as_object)
    }
}

/// Types usable with [`Json::get`]. Sealed.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_into<'v>(&self, json: &'v Json) -> Option<&'v Json>;
}

impl Index for usize {
    fn index_into<'v>(&self, json: &'v Json) -> Option<&'v Json> {
        json.as_array()?.get(*self)
    }
}

impl Index for str {
    fn index_into<'v>(&self, json: &'v Json) -> Option<&'v Json> {
        json.as_object()?.get(self)
    }
}

impl Index for String {
    fn index_into<'v>(&self, json: &'v Json) -> Option<&'v Json> {
        self.as_str().index_into(json)
    }
}

impl<T> Index for &T
where
    T: ?Sized + Index,
{
    fn index_into<'v>(&self, json: &'v Json) -> Option<&'v Json> {
        (**self).index_into(json)
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}
