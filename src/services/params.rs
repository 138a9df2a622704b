use crate::config::{NamedOption, PositionalParam};
use crate::errors::HookError;
use serde_json::{Map, Value};

/// Reserved substitution key holding the caller's identity. Never overridden
/// by positional or named values.
pub const IDENTITY_KEY: &str = "user";

/// Binds the i-th spec to `args[i]`. Absent tokens use the spec default when
/// present; required specs without a default fail; optional ones omit the
/// key. Positions in errors are 1-based.
pub fn resolve_positional(
    specs: &[PositionalParam],
    args: &[String],
) -> Result<Map<String, Value>, HookError> {
    let mut out = Map::new();
    for (index, spec) in specs.iter().enumerate() {
        match args.get(index) {
            Some(token) => {
                out.insert(spec.name.clone(), Value::String(token.clone()));
            }
            None => match &spec.default {
                Some(value) => {
                    out.insert(spec.name.clone(), value.clone());
                }
                None if spec.required => {
                    return Err(HookError::missing_positional(&spec.name, index + 1));
                }
                None => {}
            },
        }
    }
    Ok(out)
}

/// Same default/required/omit logic keyed by each spec's flag. Null option
/// values count as absent.
pub fn resolve_named(
    specs: &[NamedOption],
    options: &Map<String, Value>,
) -> Result<Map<String, Value>, HookError> {
    let mut out = Map::new();
    for spec in specs {
        match options.get(spec.flag()).filter(|value| !value.is_null()) {
            Some(value) => {
                out.insert(spec.name.clone(), value.clone());
            }
            None => match &spec.default {
                Some(value) => {
                    out.insert(spec.name.clone(), value.clone());
                }
                None if spec.required => {
                    return Err(HookError::missing_option(&spec.name, spec.flag()));
                }
                None => {}
            },
        }
    }
    Ok(out)
}

/// Merge order: identity, then positional, then named; named wins over
/// positional on key collision and nothing overrides the identity key.
pub fn invocation_mapping(
    identity: &str,
    positional: Map<String, Value>,
    named: Map<String, Value>,
) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert(IDENTITY_KEY.to_string(), Value::String(identity.to_string()));
    for (key, value) in positional {
        if key != IDENTITY_KEY {
            out.insert(key, value);
        }
    }
    for (key, value) in named {
        if key != IDENTITY_KEY {
            out.insert(key, value);
        }
    }
    out
}
