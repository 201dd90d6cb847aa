//! In-memory model of the config-tree format.

use indexmap::IndexMap;

/// A node of the config tree.
///
/// Every value in the format is either a quoted scalar string or a nested
/// object; the format has no native array type. Repeated sibling keys at
/// decode time collapse to the last occurrence (see [`Object::insert`]).
///
/// # Examples
///
/// ```
/// use steamshelf::vdf::{Node, Object};
///
/// let mut root = Object::new();
/// root.insert_scalar("appid", "400");
/// let node = Node::Object(root);
/// assert!(node.as_object().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A quoted string value.
    Scalar(String),
    /// A nested block of key/value pairs.
    Object(Object),
}

impl Node {
    /// Build a scalar node from anything string-like.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// The scalar value, if this node is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Object(_) => None,
        }
    }

    /// The nested object, if this node is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            Self::Scalar(_) => None,
        }
    }

    /// Mutable access to the nested object, if this node is an object.
    pub const fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(object) => Some(object),
            Self::Scalar(_) => None,
        }
    }
}

impl From<Object> for Node {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

/// An insertion-ordered mapping from key to child [`Node`].
///
/// Keys are unique within one object. Iteration order is the insertion
/// order and is semantically significant: the encoder preserves it within
/// each of the two entry kinds (scalars, objects).
///
/// # Examples
///
/// ```
/// use steamshelf::vdf::Object;
///
/// let mut obj = Object::new();
/// obj.insert_scalar("name", "Portal");
/// obj.insert_scalar("appid", "400");
/// let keys: Vec<&str> = obj.iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, ["name", "appid"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    entries: IndexMap<String, Node>,
}

impl Object {
    /// Create an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a child node, replacing any existing value for the key.
    ///
    /// A replaced key keeps its original position. Returns the previous
    /// value, if any, so callers can detect duplicate assignments.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.entries.insert(key.into(), node)
    }

    /// Insert a scalar child. See [`Object::insert`] for replace semantics.
    pub fn insert_scalar(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<Node> {
        self.insert(key, Node::scalar(value))
    }

    /// Look up a child node by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Look up a scalar child's value by key.
    ///
    /// Returns `None` when the key is absent or holds a nested object.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Node::as_scalar)
    }

    /// Look up a nested object child by key.
    #[must_use]
    pub fn get_object(&self, key: &str) -> Option<&Self> {
        self.get(key).and_then(Node::as_object)
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the object has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Scalar-valued entries in insertion order.
    pub fn scalars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            Node::Scalar(value) => Some((k.as_str(), value.as_str())),
            Node::Object(_) => None,
        })
    }

    /// Object-valued entries in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            Node::Object(object) => Some((k.as_str(), object)),
            Node::Scalar(_) => None,
        })
    }
}
