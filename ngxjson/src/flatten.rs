//! Tree → flat pairs (the import direction).

use crate::{
    path_key::{PathKey, join},
    tree::{Node, Object, ResourceTree},
};

/// Produces one `(key, text)` pair per leaf of `tree`.
///
/// Traversal is depth-first with children in their stored order, so the
/// output is deterministic. Leaves with empty text are emitted.
///
/// A leaf whose path cannot form a valid key (an empty name anywhere along
/// the path) is skipped with a warning. Names that contain the separator are
/// re-split, so `{"a.b": "x"}` flattens to the same key as `{"a": {"b": "x"}}`.
///
/// # Example
/// ```rust
/// use ngxjson::{ResourceTree, flatten::flatten};
/// let tree: ResourceTree = serde_json::from_str(r#"{"a":{"b":"X"},"c":"Y"}"#)?;
/// let keys: Vec<String> = flatten(&tree).into_iter().map(|(k, _)| k.join()).collect();
/// assert_eq!(keys, ["a.b", "c"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn flatten(tree: &ResourceTree) -> Vec<(PathKey, String)> {
    let mut pairs = Vec::new();
    let mut path = Vec::new();
    visit(tree.root(), &mut path, &mut pairs);
    pairs
}

fn visit<'a>(object: &'a Object, path: &mut Vec<&'a str>, pairs: &mut Vec<(PathKey, String)>) {
    for (segment, node) in object.iter() {
        path.push(segment);
        match node {
            Node::Leaf(text) => match PathKey::parse(&join(path.as_slice())) {
                Ok(key) => pairs.push((key, text.clone())),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping leaf with an unusable path");
                }
            },
            Node::Object(child) => visit(child, path, pairs),
        }
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(json: &str) -> Vec<(String, String)> {
        let tree: ResourceTree = serde_json::from_str(json).unwrap();
        flatten(&tree)
            .into_iter()
            .map(|(key, text)| (key.join(), text))
            .collect()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_flatten_nested_document() {
        assert_eq!(
            flat(r#"{"a":{"b":"X"},"c":"Y"}"#),
            pairs(&[("a.b", "X"), ("c", "Y")])
        );
    }

    #[test]
    fn test_flatten_keeps_insertion_order() {
        assert_eq!(
            flat(r#"{"x":"1","y":{"inner":"2"},"z":"3"}"#),
            pairs(&[("x", "1"), ("y.inner", "2"), ("z", "3")])
        );
    }

    #[test]
    fn test_flatten_emits_empty_text() {
        assert_eq!(flat(r#"{"empty":""}"#), pairs(&[("empty", "")]));
    }

    #[test]
    fn test_flatten_empty_object_has_no_leaves() {
        assert!(flat(r#"{"section":{}}"#).is_empty());
        assert!(flat("{}").is_empty());
    }

    #[test]
    fn test_flatten_skips_empty_names() {
        assert_eq!(
            flat(r#"{"":"lost","a":{"":"lost too","b":"kept"}}"#),
            pairs(&[("a.b", "kept")])
        );
    }

    #[test]
    fn test_flatten_dotted_names_are_resplit() {
        let (key, _) = flatten(&serde_json::from_str(r#"{"a.b":"X"}"#).unwrap())
            .into_iter()
            .next()
            .unwrap();
        assert_eq!(key.segments(), ["a", "b"]);
    }

    #[test]
    fn test_flatten_deep_path() {
        assert_eq!(
            flat(r#"{"a":{"b":{"c":{"d":"deep"}}}}"#),
            pairs(&[("a.b.c.d", "deep")])
        );
    }
}
