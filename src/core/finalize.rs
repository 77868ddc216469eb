//! Stripping bookkeeping from built records

use super::node::{Children, Node};
use super::record::Record;

/// Turn a built tree into clean [`Node`]s.
///
/// Finalizing an already-finalized tree gives back the same tree.
pub trait Finalize {
    fn finalize(self) -> Node;
}

impl Finalize for Record {
    fn finalize(self) -> Node {
        let Record {
            mut entries,
            children_label,
            children_slot,
            children,
            ..
        } = self;

        let children = children_label
            .filter(|label| !label.is_empty())
            .map(|label| {
                // A value row with the same label is replaced by the children
                // list, in that row's position.
                let slot = match entries.shift_remove_full(&label) {
                    Some((idx, _, _)) => idx,
                    None => children_slot.min(entries.len()),
                };
                Children {
                    label,
                    slot,
                    nodes: children.into_iter().map(Finalize::finalize).collect(),
                }
            });

        Node { entries, children }
    }
}

impl Finalize for Node {
    fn finalize(self) -> Node {
        let Node { entries, children } = self;
        let children = children.map(|c| Children {
            nodes: c.nodes.into_iter().map(Finalize::finalize).collect(),
            ..c
        });
        Node { entries, children }
    }
}
