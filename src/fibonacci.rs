//! Fibonacci heap over an arena.
//!
//! The heap is a forest of heap-ordered multi-way trees. Roots are linked
//! in a circular doubly linked list and the heap tracks a handle to the
//! minimum root. Insert and merge only splice rings; all restructuring is
//! deferred to `pop_min`, whose consolidation pass links equal-degree trees
//! until every root has a distinct degree. `decrease_key` cuts a node that
//! undercuts its parent and promotes it to a root, with cascading cuts
//! through already-marked ancestors keeping the trees bushy enough for the
//! O(log n) extraction bound.
//!
//! All operations run to completion synchronously; the heap has no internal
//! synchronization. Callers needing concurrency must serialize access
//! externally or run independent heaps and merge results.

use crate::arena::{Arena, Node, NodeHandle};
use crate::list;
use crate::traits::{HeapError, Less, NaturalOrder};
use slotmap::{SecondaryMap, SlotMap};
use smallvec::{smallvec, SmallVec};
use std::fmt;

// 1 / log2(phi). Multiplying by it turns a base-2 log into a base-phi log.
const INV_LOG2_PHI: f64 = 1.4404200904125564;

/// Upper bound on any node's degree in a heap of `len` nodes.
///
/// Consolidation sizes its bucket array with this: subtree sizes grow at
/// least as fast as the Fibonacci numbers, so degrees are bounded by
/// log_phi(len).
fn max_degree(len: usize) -> usize {
    if len < 2 {
        return 1;
    }
    (((len.ilog2() + 1) as f64) * INV_LOG2_PHI).ceil() as usize
}

/// A mergeable min-priority queue with O(1) amortized insert, merge, and
/// decrease-key, and O(log n) amortized extract-min.
///
/// Keys are ordered by the comparator `C`; the default [`NaturalOrder`]
/// uses `K: Ord`. [`insert`](FibonacciHeap::insert) returns a
/// [`NodeHandle`] the caller keeps to later
/// [`decrease_key`](FibonacciHeap::decrease_key) or
/// [`delete`](FibonacciHeap::delete) that element.
///
/// # Example
///
/// ```rust
/// use fibarena::{FibonacciHeap, HeapError};
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(10);
/// let h = heap.insert(30);
/// heap.decrease_key(h, 5)?;
/// assert_eq!(heap.pop_min(), Ok(5));
/// assert_eq!(heap.pop_min(), Ok(10));
/// assert_eq!(heap.pop_min(), Err(HeapError::Empty));
/// # Ok::<(), HeapError>(())
/// ```
pub struct FibonacciHeap<K, C = NaturalOrder> {
    nodes: Arena<K>,
    min: Option<NodeHandle>,
    cmp: C,
    /// Deletion sentinel: while set, the target compares below every other
    /// node. Scoped to a single `delete` call and cleared on every exit.
    deleting: Option<NodeHandle>,
}

impl<K: Ord> FibonacciHeap<K> {
    /// Creates an empty heap ordered by `K`'s natural order.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K: Ord> Default for FibonacciHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Less<K>> FibonacciHeap<K, C> {
    /// Creates an empty heap ordered by the given comparator.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            min: None,
            cmp,
            deleting: None,
        }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the minimum key, or [`HeapError::Empty`].
    pub fn find_min(&self) -> Result<&K, HeapError> {
        let min = self.min.ok_or(HeapError::Empty)?;
        Ok(&self.nodes[min].key)
    }

    /// Returns the handle of the minimum element, or [`HeapError::Empty`].
    pub fn min_handle(&self) -> Result<NodeHandle, HeapError> {
        self.min.ok_or(HeapError::Empty)
    }

    /// Returns the current key of a live element.
    pub fn key(&self, handle: NodeHandle) -> Result<&K, HeapError> {
        self.nodes
            .get(handle)
            .map(|node| &node.key)
            .ok_or(HeapError::InvalidHandle)
    }

    /// Inserts a key as a new singleton root. O(1).
    ///
    /// The returned handle stays valid until the element is removed by
    /// [`pop_min`](Self::pop_min) or [`delete`](Self::delete).
    pub fn insert(&mut self, key: K) -> NodeHandle {
        let node = Node::singleton(&mut self.nodes, key);
        self.add_root(node);
        node
    }

    /// Removes and returns the minimum key, or [`HeapError::Empty`].
    /// O(log n) amortized: this is where deferred consolidation runs.
    pub fn pop_min(&mut self) -> Result<K, HeapError> {
        let min = self.min.ok_or(HeapError::Empty)?;

        // Promote the minimum's children into the root ring.
        if let Some(child) = self.nodes[min].child.take() {
            for c in list::ring(&self.nodes, child) {
                self.nodes[c].parent = None;
                self.nodes[c].marked = false;
            }
            self.nodes[min].degree = 0;
            list::splice(&mut self.nodes, min, child);
        }

        match list::remove(&mut self.nodes, min) {
            Some(root) => {
                self.min = Some(root);
                self.consolidate();
            }
            None => self.min = None,
        }

        let node = self
            .nodes
            .remove(min)
            .expect("min handle must resolve in the arena");
        Ok(node.key)
    }

    /// Lowers the key of a live element and restores heap order.
    /// O(1) amortized.
    ///
    /// `new_key` may equal the current key; a strictly greater key is
    /// rejected with [`HeapError::KeyNotDecreased`] before any mutation.
    pub fn decrease_key(&mut self, handle: NodeHandle, new_key: K) -> Result<(), HeapError> {
        let node = self.nodes.get(handle).ok_or(HeapError::InvalidHandle)?;
        if self.cmp.less(&node.key, &new_key) {
            return Err(HeapError::KeyNotDecreased);
        }
        self.nodes[handle].key = new_key;
        self.restore_after_decrease(handle);
        Ok(())
    }

    /// Removes an arbitrary live element and returns its key.
    /// O(log n) amortized.
    ///
    /// The element is forced to become the global minimum (the deletion
    /// sentinel makes it compare below everything regardless of its key)
    /// and then extracted. Not reentrant; the sentinel is cleared before
    /// this returns on every path.
    pub fn delete(&mut self, handle: NodeHandle) -> Result<K, HeapError> {
        if !self.nodes.contains_key(handle) {
            return Err(HeapError::InvalidHandle);
        }
        self.deleting = Some(handle);
        self.restore_after_decrease(handle);
        let removed = self.pop_min();
        self.deleting = None;
        removed
    }

    /// Splices every element of `other` into this heap, leaving `other`
    /// empty (but reusable).
    ///
    /// No tree restructuring happens; consolidation stays deferred to the
    /// next `pop_min`. Because each heap owns its arena, the nodes of
    /// `other` are re-homed into this heap's arena, which takes time linear
    /// in `other.len()` and invalidates handles issued by `other`.
    pub fn merge(&mut self, other: &mut Self) {
        let Some(other_min) = other.min.take() else {
            return;
        };
        let moved = std::mem::take(&mut other.nodes);

        let Some(self_min) = self.min else {
            self.nodes = moved;
            self.min = Some(other_min);
            return;
        };

        // Re-home the nodes, then rewrite their links under the new keys.
        let mut remap: SecondaryMap<NodeHandle, NodeHandle> = SecondaryMap::new();
        let mut transplanted = Vec::with_capacity(moved.len());
        for (old, node) in moved {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            transplanted.push(new);
        }
        for &handle in &transplanted {
            let node = &self.nodes[handle];
            let left = remap[node.left];
            let right = remap[node.right];
            let parent = node.parent.map(|p| remap[p]);
            let child = node.child.map(|c| remap[c]);
            let node = &mut self.nodes[handle];
            node.left = left;
            node.right = right;
            node.parent = parent;
            node.child = child;
        }

        let other_min = remap[other_min];
        list::splice(&mut self.nodes, self_min, other_min);
        if self.node_less(other_min, self_min) {
            self.min = Some(other_min);
        }
    }

    /// Drops every element. Teardown is a single arena clear; the cyclic
    /// rings need no unlinking because no link owns its target.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
    }

    /// Compares two live nodes. The deletion sentinel's target compares
    /// below everything else for the duration of a `delete` call.
    fn node_less(&self, a: NodeHandle, b: NodeHandle) -> bool {
        if self.deleting == Some(a) {
            return true;
        }
        if self.deleting == Some(b) {
            return false;
        }
        self.cmp.less(&self.nodes[a].key, &self.nodes[b].key)
    }

    /// Merges a self-looped node into the root ring, re-checking `min`.
    /// Ties keep the incumbent minimum.
    fn add_root(&mut self, node: NodeHandle) {
        match self.min {
            Some(min) => {
                list::splice(&mut self.nodes, min, node);
                if self.node_less(node, min) {
                    self.min = Some(node);
                }
            }
            None => self.min = Some(node),
        }
    }

    /// Restores heap order after `handle`'s key was lowered (or the
    /// deletion sentinel was aimed at it).
    fn restore_after_decrease(&mut self, handle: NodeHandle) {
        if let Some(parent) = self.nodes[handle].parent {
            if self.node_less(handle, parent) {
                self.cut(handle, parent);
                self.cascading_cut(parent);
            }
        }
        if let Some(min) = self.min {
            if handle != min && self.node_less(handle, min) {
                self.min = Some(handle);
            }
        }
    }

    /// Detaches `child` from `parent`'s child ring and promotes it to a
    /// root, clearing its mark. O(1).
    fn cut(&mut self, child: NodeHandle, parent: NodeHandle) {
        let survivor = list::remove(&mut self.nodes, child);
        if self.nodes[parent].child == Some(child) {
            self.nodes[parent].child = survivor;
        }
        self.nodes[parent].degree -= 1;
        self.nodes[child].parent = None;
        self.nodes[child].marked = false;
        self.add_root(child);
    }

    /// Walks up from a node that just lost a child: an unmarked node is
    /// marked and the walk stops (the first lost child is free); a marked
    /// node is cut and the walk continues at its former parent. Roots are
    /// never marked.
    fn cascading_cut(&mut self, mut node: NodeHandle) {
        loop {
            let Some(parent) = self.nodes[node].parent else {
                break;
            };
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                break;
            }
            self.cut(node, parent);
            node = parent;
        }
    }

    /// Links `child` under `parent` during consolidation. Both are
    /// self-looped ex-roots of equal degree. O(1).
    fn link(&mut self, child: NodeHandle, parent: NodeHandle) {
        self.nodes[child].parent = Some(parent);
        self.nodes[child].marked = false;
        match self.nodes[parent].child {
            Some(first) => list::splice(&mut self.nodes, first, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[parent].degree += 1;
    }

    /// Degree-bucketed union pass: links equal-degree root trees until
    /// every remaining root has a distinct degree, then rebuilds the root
    /// ring and picks the minimum. O(log n) amortized.
    fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };
        let mut buckets: SmallVec<[Option<NodeHandle>; 32]> =
            smallvec![None; max_degree(self.nodes.len()) + 1];

        // Snapshot the ring before mutating it: linking merges trees
        // mid-walk.
        for mut root in list::ring(&self.nodes, start) {
            list::remove(&mut self.nodes, root);
            let mut degree = self.nodes[root].degree;
            while let Some(other) = buckets[degree].take() {
                // Smaller key becomes the parent; ties keep the bucket
                // occupant.
                let (parent, child) = if self.node_less(root, other) {
                    (root, other)
                } else {
                    (other, root)
                };
                self.link(child, parent);
                root = parent;
                degree += 1;
            }
            buckets[degree] = Some(root);
        }

        self.min = None;
        for root in buckets.into_iter().flatten() {
            self.add_root(root);
        }
    }
}

impl<K, C: Less<K>> Extend<K> for FibonacciHeap<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for FibonacciHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: fmt::Debug, C> fmt::Debug for FibonacciHeap<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.nodes.len())
            .field("min", &self.min.map(|m| &self.nodes[m].key))
            .finish()
    }
}

#[cfg(test)]
impl<K, C: Less<K>> FibonacciHeap<K, C> {
    /// Walks the whole forest and panics on any violated structural
    /// invariant: ring symmetry, parent/degree accounting, heap order on
    /// every parent edge, node count, unmarked roots, min-is-smallest-root,
    /// and the log_phi degree bound.
    fn check_invariants(&self) {
        assert_eq!(self.min.is_none(), self.nodes.is_empty());
        let Some(min) = self.min else { return };

        let bound = max_degree(self.nodes.len());
        let roots = list::ring(&self.nodes, min);
        let mut counted = 0usize;
        for &root in &roots {
            assert!(self.nodes[root].parent.is_none(), "root with a parent");
            assert!(!self.nodes[root].marked, "marked root");
            assert!(
                !self.cmp.less(&self.nodes[root].key, &self.nodes[min].key),
                "min is not the smallest root"
            );
            assert_eq!(self.nodes[self.nodes[root].right].left, root);
            counted += self.check_tree(root, bound);
        }
        assert_eq!(counted, self.nodes.len(), "unreachable or duplicated nodes");
    }

    fn check_tree(&self, node: NodeHandle, bound: usize) -> usize {
        let n = &self.nodes[node];
        assert!(n.degree <= bound, "degree exceeds log_phi bound");
        let mut count = 1;
        let mut children = 0;
        if let Some(child) = n.child {
            for c in list::ring(&self.nodes, child) {
                children += 1;
                assert_eq!(self.nodes[c].parent, Some(node), "broken parent link");
                assert_eq!(self.nodes[self.nodes[c].right].left, c, "broken ring link");
                assert!(
                    !self.cmp.less(&self.nodes[c].key, &n.key),
                    "child key below parent"
                );
                count += self.check_tree(c, bound);
            }
        }
        assert_eq!(children, n.degree, "degree does not match child count");
        count
    }
}
