//! In-memory form of one locale's ngx-translate document.
//!
//! A [`ResourceTree`] is a tagged tree: every node is either a [`Node::Leaf`]
//! holding text or a [`Node::Object`] holding named children in insertion
//! order. The root is always an [`Object`].

use std::{collections::HashMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
};

use crate::path_key::PathKey;

/// A node of a [`ResourceTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Terminal text value.
    Leaf(String),
    /// Named children.
    Object(Object),
}

impl Node {
    pub fn leaf(text: impl Into<String>) -> Self {
        Node::Leaf(text.into())
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(text) => Some(text),
            Node::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(object) => Some(object),
            Node::Leaf(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }
}

/// Ordered mapping of segment to child node.
///
/// Re-inserting an existing segment replaces the child in place, so the
/// earlier position is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Object {
    children: Vec<(String, Node)>,
    index: HashMap<String, usize>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, segment: &str) -> Option<&Node> {
        let &i = self.index.get(segment)?;
        Some(&self.children[i].1)
    }

    pub fn get_mut(&mut self, segment: &str) -> Option<&mut Node> {
        let &i = self.index.get(segment)?;
        Some(&mut self.children[i].1)
    }

    /// Inserts or replaces a child, returning the replaced node.
    pub fn insert(&mut self, segment: impl Into<String>, node: Node) -> Option<Node> {
        let segment = segment.into();
        if let Some(existing) = self.get_mut(&segment) {
            return Some(std::mem::replace(existing, node));
        }
        self.index.insert(segment.clone(), self.children.len());
        self.children.push((segment, node));
        None
    }

    /// Children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children
            .iter()
            .map(|(name, node)| (name.as_str(), node))
    }

    /// Follows `path` through nested objects.
    ///
    /// Returns `None` when a segment is missing or resolves to a leaf. An
    /// empty path resolves to `self`.
    pub fn object_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&Object> {
        let mut current = self;
        for segment in path {
            current = current.get(segment.as_ref())?.as_object()?;
        }
        Some(current)
    }
}

impl FromIterator<(String, Node)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (segment, node) in iter {
            object.insert(segment, node);
        }
        object
    }
}

/// One locale's document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceTree {
    root: Object,
}

impl ResourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_root(root: Object) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Object {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Resolves a key by segment-wise descent.
    pub fn get(&self, key: &PathKey) -> Option<&Node> {
        let segments = key.segments();
        let (last, parents) = segments.split_last()?;
        self.root.object_at(parents)?.get(last)
    }

    /// Text of the leaf at `key`, if the key resolves to a leaf.
    pub fn leaf(&self, key: &PathKey) -> Option<&str> {
        self.get(key)?.as_leaf()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(text) => serializer.serialize_str(text),
            Node::Object(object) => object.serialize(serializer),
        }
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len()))?;
        for (segment, node) in &self.children {
            map.serialize_entry(segment, node)?;
        }
        map.end()
    }
}

impl Serialize for ResourceTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Object {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ObjectVisitor)
    }
}

impl<'de> Deserialize<'de> for ResourceTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Object::deserialize(deserializer).map(ResourceTree::from_root)
    }
}

// Arrays only exist while reading; their elements are folded into the parent
// object under indexed names.
enum RawNode {
    Node(Node),
    Array(Vec<RawNode>),
}

fn attach(object: &mut Object, segment: String, raw: RawNode) {
    match raw {
        RawNode::Node(node) => {
            object.insert(segment, node);
        }
        RawNode::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                attach(object, format!("{}[{}]", segment, index), item);
            }
        }
    }
}

struct ObjectVisitor;

impl<'de> Visitor<'de> for ObjectVisitor {
    type Value = Object;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Object, A::Error> {
        let mut object = Object::new();
        while let Some((segment, raw)) = map.next_entry::<String, RawNode>()? {
            attach(&mut object, segment, raw);
        }
        Ok(object)
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawNodeVisitor)
    }
}

struct RawNodeVisitor;

impl<'de> Visitor<'de> for RawNodeVisitor {
    type Value = RawNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<RawNode, E> {
        Ok(RawNode::Node(Node::leaf(v)))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<RawNode, E> {
        Ok(RawNode::Node(Node::Leaf(v)))
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<RawNode, E> {
        Ok(RawNode::Node(Node::Leaf(v.to_string())))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<RawNode, E> {
        Ok(RawNode::Node(Node::Leaf(v.to_string())))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<RawNode, E> {
        Ok(RawNode::Node(Node::Leaf(v.to_string())))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<RawNode, E> {
        Ok(RawNode::Node(Node::Leaf(v.to_string())))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<RawNode, E> {
        Ok(RawNode::Node(Node::Leaf(String::new())))
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<RawNode, E> {
        self.visit_unit()
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawNode, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<RawNode>()? {
            items.push(item);
        }
        Ok(RawNode::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<RawNode, A::Error> {
        ObjectVisitor
            .visit_map(map)
            .map(|object| RawNode::Node(Node::Object(object)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> PathKey {
        PathKey::parse(s).unwrap()
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut object = Object::new();
        object.insert("x", Node::leaf("1"));
        object.insert("y", Node::leaf("2"));
        let replaced = object.insert("x", Node::leaf("3"));
        assert_eq!(replaced, Some(Node::leaf("1")));
        let order: Vec<_> = object.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["x", "y"]);
        assert_eq!(object.get("x"), Some(&Node::leaf("3")));
    }

    #[test]
    fn test_wide_object_keeps_order_and_finds_every_child() {
        let mut object: Object = (0..2000)
            .map(|i| (format!("k{}", i), Node::leaf(i.to_string())))
            .collect();
        assert_eq!(object.len(), 2000);
        assert_eq!(object.get("k1234"), Some(&Node::leaf("1234")));
        assert_eq!(object.get("k2000"), None);

        object.insert("k0", Node::leaf("first"));
        object.insert("extra", Node::leaf("last"));
        let names: Vec<_> = object.iter().map(|(name, _)| name).collect();
        assert_eq!(names.len(), 2001);
        assert_eq!(names[0], "k0");
        assert_eq!(names[2000], "extra");
        assert_eq!(object.get("k0"), Some(&Node::leaf("first")));
        assert_eq!(object.get("extra"), Some(&Node::leaf("last")));
    }

    #[test]
    fn test_object_at_stops_at_leaf() {
        let tree: ResourceTree = serde_json::from_str(r#"{"a":{"b":"X"}}"#).unwrap();
        assert!(tree.root().object_at(&["a"]).is_some());
        assert!(tree.root().object_at(&["a", "b"]).is_none());
        assert!(tree.root().object_at(&["missing"]).is_none());
        assert!(tree.root().object_at::<&str>(&[]).is_some());
    }

    #[test]
    fn test_get_and_leaf() {
        let tree: ResourceTree = serde_json::from_str(r#"{"a":{"b":"X"},"c":"Y"}"#).unwrap();
        assert_eq!(tree.leaf(&key("a.b")), Some("X"));
        assert_eq!(tree.leaf(&key("c")), Some("Y"));
        assert!(tree.get(&key("a")).unwrap().is_object());
        assert_eq!(tree.leaf(&key("a")), None);
        assert_eq!(tree.get(&key("c.d")), None);
    }

    #[test]
    fn test_deserialize_preserves_document_order() {
        let tree: ResourceTree = serde_json::from_str(r#"{"z":"1","a":"2","m":"3"}"#).unwrap();
        let order: Vec<_> = tree.root().iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_deserialize_stringifies_scalars() {
        let tree: ResourceTree =
            serde_json::from_str(r#"{"n":42,"f":1.5,"neg":-3,"t":true,"nil":null}"#).unwrap();
        assert_eq!(tree.leaf(&key("n")), Some("42"));
        assert_eq!(tree.leaf(&key("f")), Some("1.5"));
        assert_eq!(tree.leaf(&key("neg")), Some("-3"));
        assert_eq!(tree.leaf(&key("t")), Some("true"));
        assert_eq!(tree.leaf(&key("nil")), Some(""));
    }

    #[test]
    fn test_deserialize_folds_arrays_into_indexed_segments() {
        let tree: ResourceTree =
            serde_json::from_str(r#"{"items":["a",{"label":"b"}],"after":"c"}"#).unwrap();
        let order: Vec<_> = tree.root().iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["items[0]", "items[1]", "after"]);
        assert_eq!(tree.leaf(&key("items[0]")), Some("a"));
        assert_eq!(tree.leaf(&key("items[1].label")), Some("b"));
    }

    #[test]
    fn test_deserialize_duplicate_keys_keep_last_value() {
        let tree: ResourceTree = serde_json::from_str(r#"{"a":"1","b":"2","a":"3"}"#).unwrap();
        let pairs: Vec<_> = tree
            .root()
            .iter()
            .map(|(name, node)| (name, node.as_leaf().unwrap()))
            .collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_deserialize_rejects_non_object_root() {
        assert!(serde_json::from_str::<ResourceTree>(r#"["a"]"#).is_err());
        assert!(serde_json::from_str::<ResourceTree>(r#""a""#).is_err());
    }

    #[test]
    fn test_serialize_nested_in_order() {
        let tree: ResourceTree =
            serde_json::from_str(r#"{"home":{"title":"Hi","subtitle":"Sub"},"footer":"Bye"}"#)
                .unwrap();
        assert_eq!(
            serde_json::to_string(&tree).unwrap(),
            r#"{"home":{"title":"Hi","subtitle":"Sub"},"footer":"Bye"}"#
        );
    }
}
