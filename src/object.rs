//! Forgiving access to loosely shaped JSON records (form values, API payloads).
//!
//! Nothing here fails: missing properties resolve to a caller-chosen default.

use serde_json::{Map, Value};

/// The property `prop` of `obj` if present, else `""`. Arrays take an index.
pub fn check_prop(obj: &Value, prop: &str) -> Value {
  let found = match obj {
    Value::Object(m) => m.get(prop),
    Value::Array(items) => prop.parse::<usize>().ok().and_then(|i| items.get(i)),
    _ => None,
  };
  found.cloned().unwrap_or_else(|| Value::String(String::new()))
}

/// Walk a dot-separated path ("address.city", "phones.0"). Array steps take an index.
/// Stepping into a null or scalar stops the walk.
pub fn get_path<'a>(obj: &'a Value, path: &str) -> Option<&'a Value> {
  path.split('.').try_fold(obj, |cur, key| match cur {
    Value::Object(m) => m.get(key),
    Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
    _ => None,
  })
}

/// [`get_path`] with a fallback for anything missing along the way.
pub fn get_safe(obj: &Value, path: &str, default: Value) -> Value {
  get_path(obj, path).cloned().unwrap_or(default)
}

/// Hoist every leaf of a nested record to one level, keyed by its own key.
/// Array elements are keyed by index. On key clashes the later leaf wins.
pub fn flatten_object(obj: &Value) -> Map<String, Value> {
  let mut out = Map::new();
  flatten_into(obj, &mut out);
  out
}

fn flatten_into(value: &Value, out: &mut Map<String, Value>) {
  match value {
    Value::Object(m) => {
      for (k, v) in m {
        match v {
          Value::Object(_) | Value::Array(_) => flatten_into(v, out),
          leaf => {
            out.insert(k.clone(), leaf.clone());
          }
        }
      }
    }
    Value::Array(items) => {
      for (i, v) in items.iter().enumerate() {
        match v {
          Value::Object(_) | Value::Array(_) => flatten_into(v, out),
          leaf => {
            out.insert(i.to_string(), leaf.clone());
          }
        }
      }
    }
    _ => {}
  }
}

/// Keep the records where some non-empty leaf contains `term`, ignoring case.
/// Scalar records are matched on their own value.
pub fn filter_data(term: &str, data: &[Value]) -> Vec<Value> {
  let needle = term.to_lowercase();
  data
    .iter()
    .filter(|record| match record {
      Value::Object(_) | Value::Array(_) => flatten_object(record)
        .values()
        .any(|v| leaf_matches(v, &needle)),
      scalar => leaf_matches(scalar, &needle),
    })
    .cloned()
    .collect()
}

fn leaf_matches(value: &Value, needle: &str) -> bool {
  let text = match value {
    Value::String(s) if !s.is_empty() => s.clone(),
    Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
    Value::Bool(true) => "true".to_string(),
    _ => return false,
  };
  text.to_lowercase().contains(needle)
}
