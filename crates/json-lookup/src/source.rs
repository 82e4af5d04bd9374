//! Abstract decodable sources.
//!
//! The decode engine never sees raw tokens. It asks a [`Source`] a fixed
//! sequence of questions ("are you a boolean?", "a number?", ...) and keeps the
//! first answer. Every probe borrows the source immutably, so a probe that
//! answers `None` cannot have consumed anything and the next probe sees the
//! source exactly as the first one did.

use serde_json::Value;

use crate::value::Json;

/// `(key, child)` pairs of a keyed container.
pub type Keyed<'a, S> = Box<dyn Iterator<Item = (&'a str, &'a S)> + 'a>;

/// Children of a sequential container, in order.
pub type Sequential<'a, S> = Box<dyn Iterator<Item = &'a S> + 'a>;

/// A position in some tokenized input that can be probed for each JSON kind.
///
/// Implementations must answer at most one of `probe_number`, `probe_str`,
/// `probe_keyed` and `probe_sequential` for a given position. `probe_bool` is
/// allowed to overlap with `probe_number` (some hosts expose booleans as 0/1
/// numbers); the decoder asks for a boolean first.
pub trait Source: Sized {
    fn probe_bool(&self) -> Option<bool>;

    fn probe_number(&self) -> Option<f64>;

    fn probe_str(&self) -> Option<&str>;

    fn probe_keyed(&self) -> Option<Keyed<'_, Self>>;

    fn probe_sequential(&self) -> Option<Sequential<'_, Self>>;
}

/// Adapter over `serde_json`'s parsed tree. `null` answers no probe.
impl Source for Value {
    fn probe_bool(&self) -> Option<bool> {
        self.as_bool()
    }

    fn probe_number(&self) -> Option<f64> {
        self.as_f64()
    }

    fn probe_str(&self) -> Option<&str> {
        self.as_str()
    }

    fn probe_keyed(&self) -> Option<Keyed<'_, Self>> {
        let map = self.as_object()?;
        Some(Box::new(map.iter().map(|(k, v)| (k.as_str(), v))))
    }

    fn probe_sequential(&self) -> Option<Sequential<'_, Self>> {
        let items = self.as_array()?;
        Some(Box::new(items.iter()))
    }
}

/// A decoded tree is itself a source; decoding it yields an equal tree.
impl Source for Json {
    fn probe_bool(&self) -> Option<bool> {
        self.as_bool()
    }

    fn probe_number(&self) -> Option<f64> {
        self.as_f64()
    }

    fn probe_str(&self) -> Option<&str> {
        self.as_str()
    }

    fn probe_keyed(&self) -> Option<Keyed<'_, Self>> {
        let map = self.as_object()?;
        Some(Box::new(map.iter().map(|(k, v)| (k.as_str(), v))))
    }

    fn probe_sequential(&self) -> Option<Sequential<'_, Self>> {
        let items = self.as_array()?;
        Some(Box::new(items.iter()))
    }
}
