/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The document tree consumed by the engine.
//!
//! This module defines [`Node`], the parser-independent value shape the
//! engine flattens. A YAML loader (or any other structured-data parser)
//! produces this tree; the engine never sees parser-specific types.

use std::fmt;

/// A hierarchical template value: the uniform shape for documents,
/// sections, and choice options.
///
/// Mappings are ordered entry lists rather than hash maps because document
/// order is part of the contract: sections emit in source order and variable
/// definitions resolve sequentially.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An absent/null value.
    Null,

    /// A scalar, kept in its textual form.
    Scalar(String),

    /// An ordered sequence of child nodes.
    Sequence(Vec<Node>),

    /// An ordered mapping from string keys to child nodes.
    Mapping(Vec<(String, Node)>),
}

impl Node {
    /// Build a scalar node.
    pub fn scalar(text: impl Into<String>) -> Node {
        Node::Scalar(text.into())
    }

    /// Build a sequence node.
    pub fn sequence(items: impl IntoIterator<Item = Node>) -> Node {
        Node::Sequence(items.into_iter().collect())
    }

    /// Build a mapping node, preserving entry order.
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Node {
        Node::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// True for [`Node::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// The scalar text, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Parse this node as a number, if it is a numeric scalar.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(|s| s.trim().parse::<f64>().ok())
    }

    /// Look up a key in a mapping. Returns `None` for non-mappings and for
    /// absent keys. The first matching entry wins.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// The value under the first present key of `keys`, in `keys` order.
    pub fn first_present(&self, keys: &[&str]) -> Option<&Node> {
        keys.iter().find_map(|k| self.get(k))
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Node {
        Node::Scalar(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Node {
        Node::Scalar(text)
    }
}

/// Compact flow-style rendering, used by the stringify fallback of item
/// evaluation (a non-scalar in a scalar position becomes its rendered
/// text rather than an error).
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Scalar(text) => f.write_str(text),
            Node::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Node::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}
