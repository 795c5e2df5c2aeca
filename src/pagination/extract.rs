//! Locating items and cursors in response bodies

use super::types::{Page, PageLayout};
use serde_json::Value;

impl PageLayout {
    /// Split a decoded list response into raw items and cursor.
    ///
    /// A missing item array is an empty page. Anything at the item path that
    /// is not an array is rejected.
    pub fn extract(&self, body: &Value) -> Result<Page<Value>, String> {
        let items = match lookup(body, &self.items_path)? {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(format!(
                    "expected an array at '{}', found {}",
                    self.items_path,
                    type_name(&other)
                ))
            }
        };

        let cursor = match lookup(body, &self.cursor_path)? {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        Ok(Page::new(items, cursor))
    }
}

/// Resolve a path against a JSON value.
///
/// Paths starting with `$` that use wildcards, filters, or recursive descent
/// go through jsonpath-rust. A single match resolves to the matched value;
/// paths ending in `[*]` resolve to the array of matches. Everything else is a dotted walk where a literal
/// key containing dots (such as `odata.nextLink`) wins over splitting.
pub fn lookup(value: &Value, path: &str) -> Result<Option<Value>, String> {
    if path.starts_with('$') && is_complex(path) {
        return lookup_jsonpath(value, path);
    }

    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Ok(Some(value.clone()));
    }
    if let Some(found) = value.get(path) {
        return Ok(Some(found.clone()));
    }

    let mut current = value;
    for part in path.split('.') {
        current = match step(current, part) {
            Some(next) => next,
            None => return Ok(None),
        };
    }
    Ok(Some(current.clone()))
}

fn is_complex(path: &str) -> bool {
    path.contains('*') || path.contains("..") || path.contains('?')
}

fn lookup_jsonpath(value: &Value, path: &str) -> Result<Option<Value>, String> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| format!("invalid JSONPath '{path}': {e}"))?;
    match jp.find(value) {
        Value::Null => Ok(None),
        // A trailing wildcard selects elements; the matches are the result
        Value::Array(matches) if path.ends_with("[*]") => Ok(Some(Value::Array(matches))),
        Value::Array(mut matches) => match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Ok(Some(Value::Array(matches))),
        },
        found => Ok(Some(found)),
    }
}

/// Follow one dotted segment, with optional `[index]` suffix
fn step<'a>(current: &'a Value, part: &str) -> Option<&'a Value> {
    let Some(bracket) = part.find('[') else {
        return current.get(part);
    };

    let name = &part[..bracket];
    let index = part[bracket + 1..].strip_suffix(']')?.parse::<i64>().ok()?;
    let target = if name.is_empty() {
        current
    } else {
        current.get(name)?
    };
    let items = target.as_array()?;

    #[allow(clippy::cast_possible_wrap)]
    let idx = if index < 0 {
        items.len() as i64 + index
    } else {
        index
    };
    usize::try_from(idx).ok().and_then(|i| items.get(i))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
