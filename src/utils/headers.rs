use crate::utils::template::{has_unresolved_placeholder, render_string, stringify_value};
use serde_json::{Map, Value};

/// Renders header templates against the invocation mapping. String-valued
/// entries referencing any name absent from the mapping are dropped entirely,
/// so optional headers (for example an auth token tied to an optional
/// parameter) are omitted instead of being sent with literal placeholder
/// text. Non-string values are coerced to their string form and always kept.
/// Header names are rendered too.
pub fn filter_and_render(
    templates: &Map<String, Value>,
    mapping: &Map<String, Value>,
) -> Map<String, Value> {
    let mut out = Map::new();
    for (name, value) in templates.iter() {
        match value {
            Value::String(text) => {
                if has_unresolved_placeholder(text, mapping) {
                    continue;
                }
                out.insert(
                    render_string(name, mapping),
                    Value::String(render_string(text, mapping)),
                );
            }
            other => {
                out.insert(
                    render_string(name, mapping),
                    Value::String(stringify_value(other)),
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::filter_and_render;
    use serde_json::{json, Map, Value};

    fn mapping(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn renders_satisfied_headers() {
        let templates = mapping(json!({"Authorization": "Bearer {token}"}));
        let out = filter_and_render(&templates, &mapping(json!({"token": "abc"})));
        assert_eq!(out.get("Authorization"), Some(&json!("Bearer abc")));
    }

    #[test]
    fn drops_headers_with_unresolved_placeholders() {
        let templates = mapping(json!({
            "Authorization": "Bearer {token}",
            "X-User": "{user}"
        }));
        let out = filter_and_render(&templates, &mapping(json!({"user": "42"})));
        assert!(!out.contains_key("Authorization"));
        assert_eq!(out.get("X-User"), Some(&json!("42")));
    }

    #[test]
    fn coerces_and_keeps_non_string_values() {
        let templates = mapping(json!({"X-Version": 3, "X-Flag": true}));
        let out = filter_and_render(&templates, &mapping(json!({})));
        assert_eq!(out.get("X-Version"), Some(&json!("3")));
        assert_eq!(out.get("X-Flag"), Some(&json!("true")));
    }

    #[test]
    fn renders_parameterized_header_names() {
        let templates = mapping(json!({"X-{kind}-Id": "{user}"}));
        let out = filter_and_render(&templates, &mapping(json!({"kind": "Bot", "user": "9"})));
        assert_eq!(out.get("X-Bot-Id"), Some(&json!("9")));
    }
}
