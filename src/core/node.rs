//! Finalized tree nodes
//!
//! A [`Node`] is what callers get back: ordered label/value entries and,
//! when the source declared one, a list of child nodes under a named key.
//! It serializes as a single map, with the children key placed where the
//! declaration row appeared among the node's own rows.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::record::Value;

/// Children of a node and the key they are nested under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Children {
    /// Key name in the output, e.g. `"Children"`
    pub label: String,
    /// Position among the node's entries where the children key belongs
    pub slot: usize,
    pub nodes: Vec<Node>,
}

/// A clean tree node with no bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub entries: IndexMap<String, Value>,
    pub children: Option<Children>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a label's value
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.entries.get(label)
    }

    /// Label the children are nested under, if any
    pub fn children_label(&self) -> Option<&str> {
        self.children.as_ref().map(|c| c.label.as_str())
    }

    /// Child nodes (empty for a leaf)
    pub fn child_nodes(&self) -> &[Node] {
        self.children
            .as_ref()
            .map(|c| c.nodes.as_slice())
            .unwrap_or(&[])
    }

    /// A node with neither entries nor children
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.children.is_none()
    }

    /// Number of output keys on this node
    pub fn len(&self) -> usize {
        self.entries.len() + usize::from(self.children.is_some())
    }

    /// Total number of nodes in this subtree, including `self`
    pub fn count_nodes(&self) -> usize {
        1 + self
            .child_nodes()
            .iter()
            .map(Node::count_nodes)
            .sum::<usize>()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        let slot = self.children.as_ref().map(|c| c.slot);
        for (idx, (label, value)) in self.entries.iter().enumerate() {
            if let (Some(children), Some(s)) = (&self.children, slot) {
                if s == idx {
                    map.serialize_entry(&children.label, &children.nodes)?;
                }
            }
            map.serialize_entry(label, value)?;
        }
        if let Some(children) = &self.children {
            if children.slot >= self.entries.len() {
                map.serialize_entry(&children.label, &children.nodes)?;
            }
        }
        map.end()
    }
}
