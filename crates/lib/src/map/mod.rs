//! Insertion-ordered property map.
//!
//! This module provides [`Map`], a key/value store for configuration data that
//! remembers the order in which keys were first inserted. The order is part of
//! the data: configuration files are meaningful top to bottom, and exported
//! recipes must preserve the file order they came from.
//!
//! # Core Types
//!
//! - [`Map`] - The ordered key/value store
//!
//! # Ordering Semantics
//!
//! - A key's position is fixed when it is first inserted.
//! - Setting an existing key replaces its value *and moves it to the end* of
//!   the order, as if it had been removed and re-inserted.
//! - Removing and re-inserting a key places it at the end, not at its old slot.
//!
//! # Equality
//!
//! `PartialEq` compares content only, ignoring insertion order, which is the
//! convention of insertion-ordered maps in the Rust ecosystem. Use
//! [`Map::eq_with_order`] when the order matters too:
//!
//! ```
//! # use proptree::Map;
//! let mut a = Map::new();
//! a.set("k1", "v1");
//! a.set("k2", "v2");
//!
//! let mut b = Map::new();
//! b.set("k2", "v2");
//! b.set("k1", "v1");
//!
//! assert_eq!(a, b);
//! assert!(!a.eq_with_order(&b));
//! ```

mod expand;
mod hierarchy;
mod serde;

pub use expand::delete_unexpanded_props_from_string;
pub use hierarchy::merge_first_level;

use std::collections::HashMap;
use std::fmt;

/// A key/value store that preserves the insertion order of its keys.
///
/// Keys and values are opaque strings. Lookups are O(1); the order of keys is
/// tracked in a separate sequence that every iteration and export follows.
///
/// # Examples
///
/// ```
/// # use proptree::Map;
/// let mut map = Map::new();
/// map.set("board.name", "Device Uno");
/// map.set("board.upload.speed", "115200");
///
/// assert_eq!(map.get("board.name"), Some("Device Uno"));
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["board.name", "board.upload.speed"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: HashMap<String, String>,
    order: Vec<String>,
}

impl Map {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Creates a map from an unordered hash map.
    ///
    /// The insertion order follows the hash map's iteration order, which is
    /// unspecified.
    pub fn from_hashmap(entries: HashMap<String, String>) -> Self {
        let mut map = Self::new();
        for (key, value) in entries {
            map.set(key, value);
        }
        map
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries in the map
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gets the value for a key. Absence is not an error: a missing key
    /// returns `None`.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        self.entries.get(key.as_ref()).map(String::as_str)
    }

    /// Gets the value for a key, or the empty string when the key is absent.
    ///
    /// Convenient when assembling recipe strings where a missing property
    /// simply contributes nothing.
    pub fn get_or_empty(&self, key: impl AsRef<str>) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Returns true if the map contains the given key
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.entries.contains_key(key.as_ref())
    }

    /// Returns true if any entry holds the given value. O(n).
    pub fn contains_value(&self, value: impl AsRef<str>) -> bool {
        let value = value.as_ref();
        self.entries.values().any(|v| v == value)
    }

    /// Sets a value for a key, returning the previous value if present.
    ///
    /// An existing key is logically removed and re-appended, so it moves to
    /// the end of the insertion order:
    ///
    /// ```
    /// # use proptree::Map;
    /// let mut map = Map::new();
    /// map.set("k1", "a");
    /// map.set("k2", "b");
    /// map.set("k1", "c");
    ///
    /// assert_eq!(map.keys().collect::<Vec<_>>(), ["k2", "k1"]);
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let previous = self.remove(&key);
        self.order.push(key.clone());
        self.entries.insert(key, value.into());
        previous
    }

    /// Removes a key from the map, returning its value if it was present.
    /// No-op when the key is absent.
    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<String> {
        let key = key.as_ref();
        let previous = self.entries.remove(key)?;
        if let Some(position) = self.order.iter().position(|k| k == key) {
            self.order.remove(position);
        }
        Some(previous)
    }

    /// Gets a boolean reading of the value for a key: true iff the value is
    /// exactly `"true"`. Missing keys read as false.
    pub fn get_bool(&self, key: impl AsRef<str>) -> bool {
        self.get(key) == Some("true")
    }

    /// Sets a key to `"true"` or `"false"`, returning the previous value if
    /// present.
    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) -> Option<String> {
        self.set(key, if value { "true" } else { "false" })
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Iterates over the values in insertion order of their keys. Duplicated
    /// values are yielded as many times as they occur.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|key| self.entries[key].as_str())
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(|key| (key.as_str(), self.entries[key].as_str()))
    }

    /// Merges another map into this one.
    ///
    /// Every key of `source` is applied with [`Map::set`] in `source`'s order,
    /// so merged keys override existing values and move to the end of the
    /// order. Chain calls to merge several sources; later sources win.
    ///
    /// ```
    /// # use proptree::Map;
    /// let mut base = Map::new();
    /// base.set("k1", "default");
    ///
    /// let mut overlay = Map::new();
    /// overlay.set("k1", "custom");
    /// overlay.set("k2", "extra");
    ///
    /// base.merge(&overlay);
    /// assert_eq!(base.get("k1"), Some("custom"));
    /// assert_eq!(base.get("k2"), Some("extra"));
    /// ```
    pub fn merge(&mut self, source: &Map) -> &mut Self {
        for (key, value) in source.iter() {
            self.set(key, value);
        }
        self
    }

    /// Returns true if both maps hold the same entries in the same insertion
    /// order. `==` compares content only.
    pub fn eq_with_order(&self, other: &Map) -> bool {
        self.order == other.order && self.entries == other.entries
    }

    /// Renders the map as `"key=value"` lines in insertion order.
    ///
    /// A `=` occurring inside a value is not escaped; the output is a defined
    /// export contract, not a reversible encoding.
    pub fn to_lines(&self) -> Vec<String> {
        self.iter().map(|(key, value)| format!("{key}={value}")).collect()
    }
}

/// Content-only equality; insertion order is ignored.
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Map {}

/// Map-literal style dump, one entry per line in insertion order.
impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Map{{")?;
        for (key, value) in self.iter() {
            writeln!(
                f,
                "  \"{}\": \"{}\",",
                key.replace('"', "\\\""),
                value.replace('"', "\\\"")
            )?;
        }
        write!(f, "}}")
    }
}

impl<K, V> FromIterator<(K, V)> for Map
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for Map
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
