use proptree::Map;

/// Builds a Map from key/value pairs, inserting in slice order
pub fn map_of(pairs: &[(&str, &str)]) -> Map {
    let mut map = Map::new();
    for (key, value) in pairs {
        map.set(*key, *value);
    }
    map
}

/// Asserts that the map's keys come back in exactly the given order
pub fn assert_key_order(map: &Map, expected: &[&str]) {
    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, expected, "unexpected key order");
}
