use serde_json::{Map, Value};

/// String form used for substitution: strings verbatim, scalars via their
/// display form, nested values as compact JSON.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(num) => num.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

// A placeholder is `{name}` where name is non-empty and contains no brace or
// whitespace. Returns the captured name and the total consumed length when
// `tail` (which starts at a '{') opens a well-formed placeholder.
fn scan_placeholder(tail: &str) -> Option<(&str, usize)> {
    let inner = tail.strip_prefix('{')?;
    let end = inner.find('}')?;
    let name = &inner[..end];
    if name.is_empty() || name.chars().any(|c| c == '{' || c.is_whitespace()) {
        return None;
    }
    Some((name, end + 2))
}

/// Replaces every `{name}` whose name is present in the mapping; placeholders
/// with absent names stay literal. Never fails.
pub fn render_string(template: &str, mapping: &Map<String, Value>) -> String {
    let mut out = String::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let (prefix, tail) = rest.split_at(start);
        out.push_str(prefix);
        match scan_placeholder(tail) {
            Some((name, consumed)) => {
                match mapping.get(name) {
                    Some(value) => out.push_str(&stringify_value(value)),
                    None => out.push_str(&tail[..consumed]),
                }
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Recursive substitution over an arbitrary value. Arrays render element-wise
/// with order preserved; objects render both keys and values with insertion
/// order preserved; other variants pass through unchanged.
pub fn render(value: &Value, mapping: &Map<String, Value>) -> Value {
    match value {
        Value::String(text) => Value::String(render_string(text, mapping)),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| render(item, mapping)).collect())
        }
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, entry) in map.iter() {
                out.insert(render_string(key, mapping), render(entry, mapping));
            }
            Value::Object(out)
        }
        _ => value.clone(),
    }
}

/// True if any `{name}` occurrence in `text` captures a name absent from the
/// provided mapping.
pub fn has_unresolved_placeholder(text: &str, provided: &Map<String, Value>) -> bool {
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        let tail = &rest[start..];
        match scan_placeholder(tail) {
            Some((name, consumed)) => {
                if !provided.contains_key(name) {
                    return true;
                }
                rest = &tail[consumed..];
            }
            None => rest = &tail[1..],
        }
    }
    false
}
