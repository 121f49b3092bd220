//! Circular doubly linked ring primitives.
//!
//! Both the root list and every child list are rings threaded through the
//! `left`/`right` handles of their members. These helpers are the only code
//! that rewrites those handles directly; everything above them works in
//! terms of whole-ring splices.

use crate::arena::{Arena, NodeHandle};

/// Splices the ring containing `a` and the ring containing `b` into one
/// ring by cross-linking the four boundary handles. O(1).
///
/// The two rings must be distinct.
pub(crate) fn splice<K>(nodes: &mut Arena<K>, a: NodeHandle, b: NodeHandle) {
    let a_right = nodes[a].right;
    let b_left = nodes[b].left;
    nodes[a].right = b;
    nodes[b].left = a;
    nodes[b_left].right = a_right;
    nodes[a_right].left = b_left;
}

/// Splices `x` out of its ring, leaving it self-looped. Returns another
/// member of the old ring, or `None` if `x` was its sole member. O(1).
pub(crate) fn remove<K>(nodes: &mut Arena<K>, x: NodeHandle) -> Option<NodeHandle> {
    let right = nodes[x].right;
    if right == x {
        return None;
    }
    let left = nodes[x].left;
    nodes[left].right = right;
    nodes[right].left = left;
    nodes[x].left = x;
    nodes[x].right = x;
    Some(right)
}

/// Snapshot of the ring containing `start`, in ring order starting at
/// `start`. Taken before any mutation so callers may relink members while
/// walking (consolidation merges trees mid-walk).
pub(crate) fn ring<K>(nodes: &Arena<K>, start: NodeHandle) -> Vec<NodeHandle> {
    let mut members = vec![start];
    let mut current = nodes[start].right;
    while current != start {
        members.push(current);
        current = nodes[current].right;
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Node;
    use slotmap::SlotMap;

    #[test]
    fn singleton_self_loops() {
        let mut nodes: Arena<i32> = SlotMap::with_key();
        let a = Node::singleton(&mut nodes, 1);
        assert_eq!(nodes[a].left, a);
        assert_eq!(nodes[a].right, a);
        assert_eq!(ring(&nodes, a), vec![a]);
    }

    #[test]
    fn splice_two_singletons() {
        let mut nodes: Arena<i32> = SlotMap::with_key();
        let a = Node::singleton(&mut nodes, 1);
        let b = Node::singleton(&mut nodes, 2);
        splice(&mut nodes, a, b);
        assert_eq!(ring(&nodes, a), vec![a, b]);
        assert_eq!(nodes[a].right, b);
        assert_eq!(nodes[b].right, a);
        assert_eq!(nodes[a].left, b);
        assert_eq!(nodes[b].left, a);
    }

    #[test]
    fn splice_rings() {
        let mut nodes: Arena<i32> = SlotMap::with_key();
        let a = Node::singleton(&mut nodes, 1);
        let b = Node::singleton(&mut nodes, 2);
        let c = Node::singleton(&mut nodes, 3);
        let d = Node::singleton(&mut nodes, 4);
        splice(&mut nodes, a, b);
        splice(&mut nodes, c, d);
        splice(&mut nodes, a, c);
        let members = ring(&nodes, a);
        assert_eq!(members.len(), 4);
        // Every member's neighbors agree with it.
        for &m in &members {
            assert_eq!(nodes[nodes[m].right].left, m);
            assert_eq!(nodes[nodes[m].left].right, m);
        }
    }

    #[test]
    fn remove_from_pair_and_singleton() {
        let mut nodes: Arena<i32> = SlotMap::with_key();
        let a = Node::singleton(&mut nodes, 1);
        let b = Node::singleton(&mut nodes, 2);
        splice(&mut nodes, a, b);

        assert_eq!(remove(&mut nodes, a), Some(b));
        assert_eq!(nodes[a].right, a);
        assert_eq!(nodes[b].right, b);
        assert_eq!(remove(&mut nodes, b), None);
    }

    #[test]
    fn remove_middle_of_three() {
        let mut nodes: Arena<i32> = SlotMap::with_key();
        let a = Node::singleton(&mut nodes, 1);
        let b = Node::singleton(&mut nodes, 2);
        let c = Node::singleton(&mut nodes, 3);
        splice(&mut nodes, a, b);
        splice(&mut nodes, a, c);

        let survivor = remove(&mut nodes, b).unwrap();
        assert!(survivor == a || survivor == c);
        assert_eq!(ring(&nodes, a).len(), 2);
        assert_eq!(ring(&nodes, b), vec![b]);
    }
}
