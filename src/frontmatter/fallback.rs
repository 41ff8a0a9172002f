//! Restricted header grammar used when the full YAML parser is unavailable.
//!
//! Understands exactly what skill headers and workflow records use:
//! top-level `key: value` pairs, and one level of nesting under a key with an
//! empty value, where the first indented child decides whether the key holds
//! a list (`  - item`) or a mapping (`  key: value`). Every value is a string.
//! Anything else is skipped. This parser never fails.

use super::value::{Mapping, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Undetermined,
    List,
    Map,
}

/// A top-level key with an empty value, waiting for its children.
struct OpenKey {
    key: String,
    shape: Shape,
    items: Vec<Value>,
    entries: Mapping,
}

impl OpenKey {
    fn new(key: String) -> Self {
        Self {
            key,
            shape: Shape::Undetermined,
            items: Vec::new(),
            entries: Mapping::new(),
        }
    }

    fn into_value(self) -> Option<(String, Value)> {
        match self.shape {
            Shape::Undetermined => None,
            Shape::List => Some((self.key, Value::List(self.items))),
            Shape::Map => Some((self.key, Value::Map(self.entries))),
        }
    }
}

/// Parse header text with the restricted grammar.
#[must_use]
pub fn parse(text: &str) -> Mapping {
    let mut result = Mapping::new();
    let mut open: Option<OpenKey> = None;

    for line in text.trim().split('\n') {
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with("  - ") || line.starts_with("    - ") {
            if let Some(current) = open.as_mut() {
                if current.shape == Shape::Undetermined {
                    current.shape = Shape::List;
                }
                if current.shape == Shape::List {
                    let item = line.trim().trim_start_matches(['-', ' ']).trim();
                    current.items.push(Value::from(item));
                }
            }
            continue;
        }

        if line.starts_with("  ") && line.contains(':') {
            if let Some(current) = open.as_mut() {
                if current.shape == Shape::Undetermined {
                    current.shape = Shape::Map;
                }
                if current.shape == Shape::Map {
                    let (key, value) = split_pair(line.trim());
                    current
                        .entries
                        .insert(key, Value::from(strip_wrapping_quotes(value)));
                }
            }
            continue;
        }

        if line.contains(':') && !line.starts_with(' ') {
            // A childless key closed by a sibling is dropped; only the final
            // open key falls back to an empty mapping below.
            if let Some((key, value)) = open.take().and_then(save) {
                result.insert(key, value);
            }

            let (key, value) = split_pair(line);
            if value.is_empty() {
                open = Some(OpenKey::new(key.to_string()));
            } else {
                result.insert(key, Value::from(strip_wrapping_quotes(value)));
            }
        }
    }

    if let Some(current) = open {
        let key = current.key.clone();
        let value = current
            .into_value()
            .map_or_else(|| Value::Map(Mapping::new()), |(_, value)| value);
        result.insert(key, value);
    }

    result
}

fn save(current: OpenKey) -> Option<(String, Value)> {
    if current.key.is_empty() {
        return None;
    }
    current.into_value()
}

fn split_pair(line: &str) -> (&str, &str) {
    match line.split_once(':') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => (line.trim(), ""),
    }
}

/// Drop one pair of double quotes wrapping the whole value.
fn strip_wrapping_quotes(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') {
        let end = value.len().saturating_sub(1).max(1);
        value.get(1..end).unwrap_or("")
    } else {
        value
    }
}
