use std::fmt;
use std::iter::FusedIterator;

use crate::arena::NodeId;
use crate::tree::Tree;

/// Inorder walk of a subtree, yielding keys in ascending order. Created by [`Tree::inorder`] and
/// [`Tree::iter`].
///
/// The walk follows parent links rather than keeping a stack, so it never allocates. It is bounded
/// by the subtree's leftmost and rightmost nodes and stops once the two ends meet.
pub struct Inorder<'a, K> {
    tree: &'a Tree<K>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    /// Keys left between the ends when that is known, i.e. for a walk of the whole tree.
    remaining: Option<usize>,
}

impl<'a, K> Clone for Inorder<'a, K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Inorder<'a, K> {
    /// The caller guarantees `subtree` is live in `tree` when present.
    pub(crate) fn new(tree: &'a Tree<K>, subtree: Option<NodeId>) -> Self {
        let remaining = if subtree == tree.root() {
            Some(tree.size())
        } else {
            None
        };
        Self {
            tree,
            front: subtree.map(|id| tree.leftmost(id)),
            back: subtree.map(|id| tree.rightmost(id)),
            remaining,
        }
    }

    /// Ends the walk if the two ends have met. Returns whether any nodes are left after this one.
    fn finish_if_met(&mut self) -> bool {
        if let Some(remaining) = &mut self.remaining {
            *remaining -= 1;
        }
        if self.front == self.back {
            self.front = None;
            self.back = None;
            false
        } else {
            true
        }
    }
}

impl<'a, K> Iterator for Inorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let id = self.front?;
        if self.finish_if_met() {
            self.front = self.tree.successor_of(id);
        }
        Some(&self.tree.arena()[id].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.remaining, self.front) {
            (Some(remaining), _) => (remaining, Some(remaining)),
            // A subtree can't hold more than the whole tree.
            (None, Some(_)) => (1, Some(self.tree.size())),
            (None, None) => (0, Some(0)),
        }
    }
}

impl<'a, K> DoubleEndedIterator for Inorder<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        let id = self.back?;
        if self.finish_if_met() {
            self.back = self.tree.predecessor_of(id);
        }
        Some(&self.tree.arena()[id].key)
    }
}

impl<'a, K> FusedIterator for Inorder<'a, K> {}

impl<'a, K> fmt::Debug for Inorder<'a, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
