//! Hierarchical decomposition of dot-delimited key spaces.
//!
//! Keys use `.` as a nesting separator by convention; nothing models the
//! hierarchy explicitly. The operations here interpret it on demand, carving
//! independent sub-maps and numbered series out of a flat [`Map`]. All of them
//! are read-only: mutating a derived map never affects its source.

use std::collections::{HashMap, HashSet};

use super::Map;

impl Map {
    /// Extracts the sub-map rooted at `root`.
    ///
    /// Every key of the form `root.rest` is re-keyed to `rest` in a new map,
    /// preserving relative order. The key equal to `root` itself (no trailing
    /// segment) is not part of the subtree.
    ///
    /// ```
    /// # use proptree::Map;
    /// let mut map = Map::new();
    /// map.set("uno.name", "Device Uno");
    /// map.set("uno.upload.tool", "flasher");
    /// map.set("duo.name", "Device Duo");
    ///
    /// let uno = map.sub_tree("uno");
    /// assert_eq!(uno.get("name"), Some("Device Uno"));
    /// assert_eq!(uno.get("upload.tool"), Some("flasher"));
    /// assert_eq!(uno.len(), 2);
    /// ```
    pub fn sub_tree(&self, root: impl AsRef<str>) -> Map {
        let prefix = format!("{}.", root.as_ref());
        let mut sub = Map::new();
        for (key, value) in self.iter() {
            if let Some(rest) = key.strip_prefix(&prefix) {
                sub.set(rest, value);
            }
        }
        sub
    }

    /// Partitions the map by the first level of the key hierarchy.
    ///
    /// Each key containing at least one `.` lands in the group named by its
    /// first segment, re-keyed to the remainder; keys without a `.` have no
    /// remainder and are silently excluded. Group maps preserve the relative
    /// order of their keys; the outer mapping is unordered.
    pub fn first_level_of(&self) -> HashMap<String, Map> {
        let mut groups: HashMap<String, Map> = HashMap::new();
        for (key, value) in self.iter() {
            let Some((first, rest)) = key.split_once('.') else {
                continue;
            };
            groups.entry(first.to_string()).or_default().set(rest, value);
        }
        groups
    }

    /// Returns the first segments of all keys, de-duplicated, in
    /// first-occurrence order. A key without a `.` contributes itself.
    pub fn first_level_keys(&self) -> Vec<String> {
        let mut taken = HashSet::new();
        let mut firsts = Vec::new();
        for key in self.keys() {
            let first = key.split_once('.').map(|(first, _)| first).unwrap_or(key);
            if taken.insert(first.to_string()) {
                firsts.push(first.to_string());
            }
        }
        firsts
    }

    /// Extracts the numbered sub-maps below `root`, in index order.
    ///
    /// The subtree at `root` is probed for sub-trees keyed `0`, `1`, `2`, …
    /// and each non-empty one becomes an element of the result. Indices 0 and
    /// 1 are both probed before giving up, so 1-based upstream data works; a
    /// hole after index 1 stops the scan. When no indexed sub-map exists at
    /// all, the whole subtree is returned as a single element, treating flat
    /// data as an implicit one-element series.
    ///
    /// ```
    /// # use proptree::Map;
    /// let mut map = Map::new();
    /// map.set("due.upload_port.0.vid", "0x1000");
    /// map.set("due.upload_port.0.pid", "0x2000");
    /// map.set("due.upload_port.1.vid", "0x1001");
    /// map.set("due.upload_port.1.pid", "0x2001");
    ///
    /// let ports = map.extract_sub_index_sets("due.upload_port");
    /// assert_eq!(ports.len(), 2);
    /// assert_eq!(ports[0].get("vid"), Some("0x1000"));
    /// assert_eq!(ports[1].get("vid"), Some("0x1001"));
    /// ```
    pub fn extract_sub_index_sets(&self, root: impl AsRef<str>) -> Vec<Map> {
        let subtree = self.sub_tree(root);
        if subtree.is_empty() {
            return Vec::new();
        }

        let mut sets = Vec::new();
        let mut idx = 0usize;
        loop {
            let indexed = subtree.sub_tree(idx.to_string());
            idx += 1;
            if !indexed.is_empty() {
                sets.push(indexed);
            } else if idx > 1 {
                // sub-indexes may start at 1, so probe both 0 and 1
                break;
            }
        }

        if sets.is_empty() {
            sets.push(subtree);
        }
        sets
    }

    /// Extracts the numbered values below `root`, in ascending index order.
    ///
    /// Immediate children of the subtree at `root` whose keys are pure decimal
    /// integers are collected, sorted and de-duplicated; holes in the sequence
    /// are skipped silently. Zero-padded forms normalize to their integer
    /// value, and the lookup uses the normalized key, so `"05"` collapses onto
    /// `"5"`. Numeric and non-numeric children are mutually exclusive
    /// interpretations: when any indexed value exists, non-numeric children
    /// are ignored. With no numeric children at all, the value at `root`
    /// itself is the single result, if present.
    ///
    /// ```
    /// # use proptree::Map;
    /// let mut map = Map::new();
    /// map.set("due.discovery.required.0", "builtin");
    /// map.set("due.discovery.required.1", "serial");
    ///
    /// let required = map.extract_sub_index_lists("due.discovery.required");
    /// assert_eq!(required, ["builtin", "serial"]);
    /// ```
    pub fn extract_sub_index_lists(&self, root: impl AsRef<str>) -> Vec<String> {
        let root = root.as_ref();
        let subtree = self.sub_tree(root);

        let mut indexes: Vec<usize> = subtree
            .keys()
            .filter(|key| !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|key| key.parse().ok())
            .collect();
        indexes.sort_unstable();
        indexes.dedup();

        let mut values = Vec::new();
        for idx in indexes {
            if let Some(value) = subtree.get(idx.to_string()) {
                values.push(value.to_string());
            }
        }

        // with no indexed values at all, fall back to the flat "root" value
        if values.is_empty()
            && let Some(value) = self.get(root)
        {
            values.push(value.to_string());
        }

        values
    }
}

/// Merges maps-of-maps as obtained from [`Map::first_level_of`] into `target`.
/// Later sources replace whole groups under the same first-level key.
pub fn merge_first_level(target: &mut HashMap<String, Map>, sources: &[HashMap<String, Map>]) {
    for source in sources {
        for (key, group) in source {
            target.insert(key.clone(), group.clone());
        }
    }
}
