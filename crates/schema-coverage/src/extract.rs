//! Field-path extraction for JSON values.
//!
//! Walks a JSON value and records one [`FieldDescriptor`] per object key
//! and one per non-empty array.
//!
//! ```text
//! {"libraries": [{"name": "lwjgl"}]}
//!   -> libraries (list)
//!   -> libraries[] (dict)
//!   -> libraries[].name (str)
//! ```
//!
//! Arrays are summarized by their first element only. Later elements are
//! not inspected, so heterogeneous arrays report the shape of index 0.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::field::{FieldDescriptor, JsonKind};

/// Suffix appended to a path to address "an element of this array".
const ARRAY_ELEMENT: &str = "[]";

/// Extract every field descriptor reachable from `value`.
///
/// `prefix` is the path already traversed and is empty for a whole
/// document. Scalars produce nothing on their own: their descriptor is
/// emitted by the enclosing object or array.
pub fn extract(value: &Value, prefix: &str) -> BTreeSet<FieldDescriptor> {
    let mut fields = BTreeSet::new();
    extract_into(value, prefix, &mut fields);
    fields
}

fn extract_into(
    value: &Value,
    prefix: &str,
    fields: &mut BTreeSet<FieldDescriptor>,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = join_key(prefix, key);
                fields.insert(FieldDescriptor::new(
                    path.clone(),
                    JsonKind::of(child),
                ));
                if is_container(child) {
                    extract_into(child, &path, fields);
                }
            }
        }

        Value::Array(items) => {
            let Some(first) = items.first() else {
                return;
            };
            let path = format!("{prefix}{ARRAY_ELEMENT}");
            fields.insert(FieldDescriptor::new(path.clone(), JsonKind::of(first)));
            if is_container(first) {
                extract_into(first, &path, fields);
            }
        }

        _ => {}
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Objects and arrays; empty arrays are filtered out by the array arm.
fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}
