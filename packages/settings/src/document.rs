// ABOUTME: Operations on nested settings documents
// ABOUTME: Deep merge, path resolution and path assignment over serde_json values

use serde_json::{Map, Value};

use crate::path::{PathSegment, SettingsPath};

/// Merge `overlay` into `target` in place.
///
/// Object into object recurses per key and keeps keys that only exist in
/// `target`. Every other combination replaces `target` with `overlay`, so
/// arrays are swapped wholesale rather than merged element-wise.
pub fn merge_into(target: &mut Value, overlay: Value) {
    match (target, overlay) {
        (Value::Object(target_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                merge_into(target_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (target, overlay) => {
            *target = overlay;
        }
    }
}

/// Return a new document holding `base` overridden by `overlay`
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay.clone());
    merged
}

/// Look up the value at `path`, if every segment exists
pub fn resolve<'a>(document: &'a Value, path: &SettingsPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(document, |current, segment| match (current, segment) {
            (Value::Object(map), segment) => map.get(&segment.to_string()),
            (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
            _ => None,
        })
}

/// Store `value` at `path`, creating intermediate containers as needed.
///
/// A missing or scalar intermediate becomes an array when the segment used to
/// index into it is an `Index`, otherwise an object. An array indexed with a
/// `Key` is replaced by an object. Existing scalars are overwritten.
pub fn assign(document: &mut Value, path: &SettingsPath, value: Value) {
    let Some((leaf, parents)) = path.segments().split_last() else {
        return;
    };

    let mut current = document;
    for segment in parents {
        current = child_slot(current, segment);
    }
    *child_slot(current, leaf) = value;
}

fn ensure_container(slot: &mut Value, segment: &PathSegment) {
    let fits = matches!(
        (&*slot, segment),
        (Value::Object(_), _) | (Value::Array(_), PathSegment::Index(_))
    );

    if !fits {
        *slot = match segment {
            PathSegment::Index(_) => Value::Array(Vec::new()),
            PathSegment::Key(_) => Value::Object(Map::new()),
        };
    }
}

fn child_slot<'a>(container: &'a mut Value, segment: &PathSegment) -> &'a mut Value {
    ensure_container(container, segment);

    match (container, segment) {
        (Value::Array(items), PathSegment::Index(index)) => {
            if items.len() <= *index {
                items.resize(*index + 1, Value::Null);
            }
            &mut items[*index]
        }
        (Value::Object(map), segment) => map.entry(segment.to_string()).or_insert(Value::Null),
        // ensure_container leaves only the two shapes above
        (other, _) => other,
    }
}
