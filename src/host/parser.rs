use serde_json::{Map, Value};

/// A raw command line split into trigger, positional tokens, and named
/// option values (`--flag value`; a bare `--flag` stores "true").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub trigger: String,
    pub args: Vec<String>,
    pub options: Map<String, Value>,
}

// Whitespace tokenizer with double-quote grouping; quotes are stripped.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

pub fn parse_line(line: &str) -> Option<ParsedCommand> {
    let tokens = tokenize(line);
    let mut iter = tokens.into_iter();
    let trigger = iter.next()?;
    let trigger = trigger.strip_prefix('/').unwrap_or(&trigger).to_string();
    if trigger.is_empty() {
        return None;
    }

    let mut args = Vec::new();
    let mut options = Map::new();
    let mut pending_flag: Option<String> = None;
    for token in iter {
        if let Some(flag) = token.strip_prefix("--") {
            if let Some(previous) = pending_flag.take() {
                options.insert(previous, Value::String("true".to_string()));
            }
            pending_flag = Some(flag.to_string());
        } else if let Some(flag) = pending_flag.take() {
            options.insert(flag, Value::String(token));
        } else {
            args.push(token);
        }
    }
    if let Some(flag) = pending_flag {
        options.insert(flag, Value::String("true".to_string()));
    }

    Some(ParsedCommand {
        trigger,
        args,
        options,
    })
}
