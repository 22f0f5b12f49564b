//! JSON merge helper for layered configuration.

use serde_json::Value;

/// Merge `overlay` into `base`: objects merge key by key, anything else
/// (scalars, arrays, type changes) replaces the base value.
pub(super) fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                if let Some(existing) = base_map.get_mut(key) {
                    merge_json_values(existing, value);
                } else {
                    base_map.insert(key.clone(), value.clone());
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_and_scalars_replace() {
        let mut base = json!({ "api": { "base_url": "http://a", "timeout_secs": 10 } });
        merge_json_values(&mut base, &json!({ "api": { "timeout_secs": 3 } }));
        assert_eq!(
            base,
            json!({ "api": { "base_url": "http://a", "timeout_secs": 3 } })
        );
    }

    #[test]
    fn overlay_of_different_shape_replaces() {
        let mut base = json!({ "display": { "timezone": "utc" } });
        merge_json_values(&mut base, &json!({ "display": "local" }));
        assert_eq!(base, json!({ "display": "local" }));
    }
}
