//! JSON tree manipulation shared by the in-memory feed and the streaming
//! client's local replica.

use serde_json::{Map, Value};

pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Resolve the subtree at `path`, if any.
pub(crate) fn get_at<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    for segment in segments(path) {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}

/// Replace the subtree at `path`, creating intermediate objects.
pub(crate) fn set_at(root: &mut Value, path: &str, value: Value) {
    let parts: Vec<&str> = segments(path).collect();
    let Some((last, ancestors)) = parts.split_last() else {
        *root = value;
        return;
    };
    let mut node = root;
    for segment in ancestors {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Some(map) = node.as_object_mut() else {
            return;
        };
        node = map
            .entry((*segment).to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Some(map) = node.as_object_mut() {
        map.insert((*last).to_owned(), value);
    }
}

/// Remove the subtree at `path`. Missing paths are a no-op.
pub(crate) fn delete_at(root: &mut Value, path: &str) {
    let parts: Vec<&str> = segments(path).collect();
    let Some((last, ancestors)) = parts.split_last() else {
        *root = Value::Object(Map::new());
        return;
    };
    let mut node = root;
    for segment in ancestors {
        match node.as_object_mut().and_then(|map| map.get_mut(*segment)) {
            Some(child) => node = child,
            None => return,
        }
    }
    if let Some(map) = node.as_object_mut() {
        map.remove(*last);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_then_get() {
        let mut root = json!({});
        set_at(&mut root, "shop/users/Ali", json!({"role": "user"}));
        assert_eq!(get_at(&root, "shop/users/Ali").unwrap()["role"], "user");
        assert!(get_at(&root, "shop/users/Bob").is_none());
    }

    #[test]
    fn test_set_at_root_replaces_everything() {
        let mut root = json!({"a": 1});
        set_at(&mut root, "/", json!({"b": 2}));
        assert_eq!(root, json!({"b": 2}));
    }

    #[test]
    fn test_set_overwrites_scalar_ancestor() {
        let mut root = json!({"shop": 5});
        set_at(&mut root, "shop/products/p1", json!({"name": "Tee"}));
        assert_eq!(get_at(&root, "shop/products/p1").unwrap()["name"], "Tee");
    }

    #[test]
    fn test_delete_missing_path_is_noop() {
        let mut root = json!({"shop": {"a": 1}});
        delete_at(&mut root, "shop/b/c");
        assert_eq!(root, json!({"shop": {"a": 1}}));
    }

    #[test]
    fn test_delete_at_root_clears() {
        let mut root = json!({"a": 1});
        delete_at(&mut root, "");
        assert_eq!(root, json!({}));
    }
}
