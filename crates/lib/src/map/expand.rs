//! Placeholder expansion against the map's own entries.
//!
//! Strings may contain `{key}` markers; expansion replaces each marker with
//! the corresponding value, and since values may themselves contain markers,
//! the substitution is re-run until a fixed point. A hard pass limit keeps
//! self-referential or mutually-cyclic placeholders from looping: they simply
//! survive as literal markers in the output. Non-convergence is never an
//! error.

use std::sync::LazyLock;

use rand::RngCore;
use regex::Regex;
use tracing::debug;

use super::Map;

/// Maximum number of substitution passes before giving up on convergence.
const MAX_EXPANSION_PASSES: usize = 10;

static UNEXPANDED_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{.+?\}").unwrap());

impl Map {
    /// Expands `{key}` markers in `input` using the map's values.
    ///
    /// The values may contain markers themselves; they are evaluated
    /// recursively, up to 10 passes. Markers that never resolve (unknown keys,
    /// reference cycles) are left in place literally.
    ///
    /// ```
    /// # use proptree::Map;
    /// let mut map = Map::new();
    /// map.set("upload.protocol", "serial");
    /// map.set("recipe", "flash -p {upload.protocol}");
    ///
    /// assert_eq!(map.expand_props_in_string("{recipe}"), "flash -p serial");
    /// ```
    pub fn expand_props_in_string(&self, input: &str) -> String {
        self.expand_props(input, false)
    }

    /// Like [`Map::expand_props_in_string`], additionally emitting a tracing
    /// event for each pass and each substitution actually performed. The
    /// returned string is identical to the plain variant.
    pub fn debug_expand_props_in_string(&self, input: &str) -> String {
        self.expand_props(input, true)
    }

    fn expand_props(&self, input: &str, debug: bool) -> String {
        let mut current = input.to_string();
        for pass in 0..MAX_EXPANSION_PASSES {
            if debug {
                debug!(pass, current = %current, "expansion pass");
            }
            let mut next = current.clone();
            for (key, value) in &self.entries {
                let marker = format!("{{{key}}}");
                if debug && next.contains(&marker) {
                    debug!(key = %key, value = %value, "replacing marker");
                }
                next = next.replace(&marker, value);
            }
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// Checks whether the absence of `prop` leaves a hole when `input` is
    /// expanded.
    ///
    /// Returns false if `prop` is already defined in the map, or if `{prop}`
    /// is not reachable from `input` through the placeholder graph; true
    /// otherwise, meaning expansion of `input` would use `prop`'s value if it
    /// had one. The map itself is never mutated.
    ///
    /// The check works on a clone: `prop` is bound to a probe token that can
    /// occur nowhere else, the clone is expanded, and the token's survival in
    /// the output is the answer.
    pub fn is_property_missing_in_expansion(&self, prop: impl AsRef<str>, input: &str) -> bool {
        let prop = prop.as_ref();
        if self.contains_key(prop) {
            return false;
        }

        let mut probe = self.clone();

        // Find a token that collides with neither the input string nor any
        // existing key or value
        let mut rng = rand::thread_rng();
        let token = loop {
            let candidate = rng.next_u64().to_string();
            if input.contains(&candidate)
                || probe.contains_key(&candidate)
                || probe.contains_value(&candidate)
            {
                continue;
            }
            break candidate;
        };
        probe.set(prop, token.as_str());

        probe.expand_props(input, false).contains(&token)
    }
}

/// Removes every `{…}` marker left unexpanded by
/// [`Map::expand_props_in_string`].
///
/// ```
/// # use proptree::map::delete_unexpanded_props_from_string;
/// assert_eq!(
///     delete_unexpanded_props_from_string("flash -p {unknown.key} -b 115200"),
///     "flash -p  -b 115200"
/// );
/// ```
pub fn delete_unexpanded_props_from_string(input: &str) -> String {
    UNEXPANDED_MARKER.replace_all(input, "").into_owned()
}
