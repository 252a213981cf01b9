//! Snapshot-friendly view of a process or workflow output channel map.
//!
//! Channel maps carry every emission twice: once under its positional index
//! (`"0"`, `"1"`, ...) and once under its emit name. Positional entries are
//! dropped when named ones exist, and values of unstable keys (typically
//! absolute output paths) are reduced to their file names.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};

fn is_positional(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Sanitize `channel` for snapshotting.
///
/// `path_exists` decides whether a string names a path on disk; pass
/// [`path_exists_on_disk`] in production and a stub in tests.
pub fn sanitize_channel(
    channel: &Map<String, Value>,
    unstable_keys: &[String],
    path_exists: impl Fn(&str) -> bool,
) -> BTreeMap<String, Value> {
    let multi = channel.len() > 1;
    channel
        .iter()
        .filter(|(key, _)| !(multi && is_positional(key)))
        .map(|(key, value)| {
            let value = if unstable_keys.iter().any(|k| k == key) {
                stabilize(value, &path_exists)
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect()
}

/// `true` when `s` names an existing file or directory.
pub fn path_exists_on_disk(s: &str) -> bool {
    Path::new(s).exists()
}

fn stabilize(value: &Value, path_exists: &impl Fn(&str) -> bool) -> Value {
    match value {
        Value::String(s) if path_exists(s) => Value::String(file_name(s).to_string()),
        Value::Array(items) => Value::Array(items.iter().map(|v| stabilize(v, path_exists)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), stabilize(v, path_exists)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Text after the last `/`, or the whole string when there is none.
fn file_name(s: &str) -> &str {
    s.rsplit_once('/').map_or(s, |(_, name)| name)
}
