//! Builder that turns flat `(key, text)` pairs into a [`ResourceTree`].
//!
//! Pairs are applied in order. Structure is decided by the first writer: a
//! key that would need an existing leaf to become an object is dropped. A
//! key that ends exactly on an existing node replaces that node.
//!
//! # Example
//!
//! ```rust
//! use ngxjson::{PathKey, builder::{Placement, TreeBuilder}};
//!
//! let mut builder = TreeBuilder::new();
//! builder.insert(&PathKey::parse("home.title")?, "Hi");
//! builder.insert(&PathKey::parse("footer")?, "Bye");
//! let skipped = builder.insert(&PathKey::parse("footer.note")?, "lost");
//! assert!(matches!(skipped, Placement::Skipped { .. }));
//!
//! let tree = builder.build();
//! assert_eq!(
//!     serde_json::to_string(&tree)?,
//!     r#"{"home":{"title":"Hi"},"footer":"Bye"}"#
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{
    path_key::PathKey,
    tree::{Node, Object, ResourceTree},
};

/// Where a pair ended up in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Written at its own path below an existing object, replacing any node
    /// that was there.
    Set,
    /// A new chain of objects was attached below the deepest existing object
    /// on the path, `depth` segments below the root (0 = the root itself).
    Grafted { depth: usize },
    /// An existing leaf at `blocked_at` occupies an intermediate segment.
    Skipped { blocked_at: PathKey },
}

#[derive(Debug, Default)]
pub struct TreeBuilder {
    root: Object,
    skipped: Vec<PathKey>,
}

impl TreeBuilder {
    /// Creates a builder with an empty root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places one pair.
    pub fn insert(&mut self, key: &PathKey, text: impl Into<String>) -> Placement {
        let Some((last, parents)) = key.segments().split_last() else {
            unreachable!("a path key always has at least one segment");
        };

        let placement = match place(&mut self.root, parents, last, text.into(), 0) {
            Descent::Set => Placement::Set,
            Descent::Grafted(depth) => Placement::Grafted { depth },
            Descent::Blocked(depth) => Placement::Skipped {
                blocked_at: key.prefix(depth),
            },
        };

        if let Placement::Skipped { blocked_at } = &placement {
            tracing::debug!(
                key = %key,
                blocked_at = %blocked_at,
                "skipping key that conflicts with an existing leaf"
            );
            self.skipped.push(key.clone());
        }

        placement
    }

    /// Places every pair in iteration order.
    pub fn extend<I, T>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (PathKey, T)>,
        T: Into<String>,
    {
        for (key, text) in pairs {
            self.insert(&key, text);
        }
    }

    /// Keys dropped so far because of a structural conflict, in input order.
    pub fn skipped(&self) -> &[PathKey] {
        &self.skipped
    }

    /// Finishes building.
    pub fn build(self) -> ResourceTree {
        ResourceTree::from_root(self.root)
    }
}

/// Builds a tree from ordered pairs in one go.
pub fn unflatten<I, T>(pairs: I) -> ResourceTree
where
    I: IntoIterator<Item = (PathKey, T)>,
    T: Into<String>,
{
    let mut builder = TreeBuilder::new();
    builder.extend(pairs);
    builder.build()
}

enum Descent {
    Set,
    Grafted(usize),
    Blocked(usize),
}

// Descends through existing objects along `parents`. The deepest object
// reached is the collision point: if it is the full parent path the leaf is
// written there, otherwise the rest of the path is grafted as a new chain
// unless the next segment is taken by a leaf.
fn place(
    object: &mut Object,
    parents: &[String],
    last: &str,
    text: String,
    depth: usize,
) -> Descent {
    let Some((segment, rest)) = parents.split_first() else {
        object.insert(last, Node::Leaf(text));
        return Descent::Set;
    };

    match object.get_mut(segment) {
        Some(Node::Object(child)) => place(child, rest, last, text, depth + 1),
        Some(Node::Leaf(_)) => Descent::Blocked(depth + 1),
        None => {
            object.insert(segment.clone(), chain(rest, last, text));
            Descent::Grafted(depth)
        }
    }
}

// `rest.0 → rest.1 → … → last → Leaf(text)`
fn chain(rest: &[String], last: &str, text: String) -> Node {
    let tip = Node::Object(Object::from_iter([(last.to_string(), Node::Leaf(text))]));
    rest.iter().rev().fold(tip, |child, segment| {
        Node::Object(Object::from_iter([(segment.clone(), child)]))
    })
}
