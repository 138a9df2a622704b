use serde_json::{Map, Value};

/// Flattens a response payload into dot-joined keys for templating. Every
/// nested non-array object contributes both its raw value under the parent
/// key and recursive `parent.child` entries. Arrays are kept as-is under
/// their key. A non-object root yields an empty mapping.
pub fn flatten(value: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    if let Value::Object(map) = value {
        flatten_into(map, "", &mut out);
    }
    out
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut Map<String, Value>) {
    for (key, entry) in map.iter() {
        let flat_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        out.insert(flat_key.clone(), entry.clone());
        if let Value::Object(nested) = entry {
            flatten_into(nested, &flat_key, out);
        }
    }
}
