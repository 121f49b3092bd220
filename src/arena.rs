//! Node storage: a slotmap arena owning every tree node.
//!
//! The arena is the only owner of node storage. All structural links
//! (`parent`, `child`, `left`, `right`, and the heap's `min`) are plain
//! [`NodeHandle`] keys into it, so the circular sibling rings never form an
//! ownership cycle and dropping the arena tears everything down at once.
//! The keys are generational: once a node is removed, a stale handle to its
//! slot stops resolving instead of reaching the slot's next occupant.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to an element in a Fibonacci heap.
    ///
    /// Returned by `insert` and retained by the caller for later
    /// `decrease_key`/`delete` calls. A handle is tied to the heap instance
    /// that issued it; using it with a different heap is not meaningful and
    /// may resolve to an unrelated node.
    pub struct NodeHandle;
}

pub(crate) type Arena<K> = SlotMap<NodeHandle, Node<K>>;

/// A single heap entry.
///
/// `left`/`right` link the node into a circular sibling ring: the root ring
/// if `parent` is `None`, otherwise the child ring hanging off
/// `parent.child`. A lone node's `left` and `right` point to itself.
pub(crate) struct Node<K> {
    pub key: K,
    /// Back-reference only; never an ownership edge.
    pub parent: Option<NodeHandle>,
    /// One representative child; its ring enumerates the full child set.
    pub child: Option<NodeHandle>,
    pub left: NodeHandle,
    pub right: NodeHandle,
    /// Count of direct children.
    pub degree: usize,
    /// True iff this node has lost a child since it last became a child of
    /// its current parent. Always false for roots.
    pub marked: bool,
}

impl<K> Node<K> {
    /// Allocates a new self-looped singleton in the arena.
    pub fn singleton(arena: &mut Arena<K>, key: K) -> NodeHandle {
        arena.insert_with_key(|handle| Node {
            key,
            parent: None,
            child: None,
            left: handle,
            right: handle,
            degree: 0,
            marked: false,
        })
    }
}
