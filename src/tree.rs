//! An unbalanced BST with parent links. Keys are stored once each; inserting a key equal to an
//! existing one adds another node to the right of it rather than overwriting.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Tree, TreeError};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&1).unwrap_err(), TreeError::Empty);
//!
//! for key in [5, 3, 8, 1, 4] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
//!
//! // Neighbours in sorted order.
//! assert_eq!(tree.inorder_successor(&4).unwrap().map(|n| *n.key()), Some(5));
//! assert_eq!(tree.inorder_predecessor(&4).unwrap().map(|n| *n.key()), Some(3));
//!
//! // Deleting a key hands it back.
//! assert_eq!(tree.delete(&3), Ok(3));
//! assert_eq!(tree.search(&3).unwrap_err(), TreeError::NotFound);
//! assert_eq!(tree.size(), 4);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::trace;

use crate::arena::{Arena, Node, NodeId, Side};
use crate::error::TreeError;
use crate::iter::Inorder;
use crate::node::NodeRef;

/// A Binary Search Tree that never rebalances. Its shape, and so the cost of every operation, is
/// decided entirely by the order keys were inserted in.
pub struct Tree<K> {
    arena: Arena<K>,
    root: Option<NodeId>,
    size: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone keeps the same [`NodeId`]s, so a handle taken from one tree resolves to the matching
/// node of its clone.
impl<K> Clone for Tree<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
            size: self.size,
        }
    }
}

/// Lists every node in inorder. The walk steps through parent links so a degenerate tree formats
/// in constant stack space.
impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("root", &self.root)
            .field("nodes", &DebugNodes(self))
            .finish()
    }
}

struct DebugNodes<'a, K>(&'a Tree<K>);

impl<'a, K> fmt::Debug for DebugNodes<'a, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.0;
        let mut list = f.debug_list();
        let mut current = tree.root.map(|root| tree.leftmost(root));
        while let Some(id) = current {
            list.entry(&NodeRef::new(tree, id));
            current = tree.successor_of(id);
        }
        list.finish()
    }
}

/// Prints the keys in inorder, separated by spaces.
impl<K> fmt::Display for Tree<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Inorder<'a, K>;

    fn into_iter(self) -> Inorder<'a, K> {
        self.iter()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            size: 0,
        }
    }

    /// The handle of the root node, if the tree has one.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// How many keys are in the tree, counting duplicates.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of levels in the tree; `0` when empty. Nothing keeps this near `lg N`: inserting
    /// keys in sorted order makes it equal to [`size`][Tree::size].
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            tallest = tallest.max(depth);
            let node = &self.arena[id];
            stack.extend(node.left.map(|id| (id, depth + 1)));
            stack.extend(node.right.map(|id| (id, depth + 1)));
        }
        tallest
    }

    /// Looks up a node by handle. Returns `None` once the node has been deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let id = tree.insert("a");
    /// assert_eq!(tree.get(id).map(|n| *n.key()), Some("a"));
    ///
    /// tree.delete(&"a").unwrap();
    /// assert!(tree.get(id).is_none());
    /// ```
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, K>> {
        self.arena.contains(id).then(|| NodeRef::new(self, id))
    }

    /// Inserts `key` as a new leaf and returns its handle. A key equal to one already present goes
    /// to the right of it, so equal keys keep their insertion order in an inorder walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.insert(2);
    /// let dup = tree.insert(2);
    ///
    /// assert_eq!(tree.root(), Some(root));
    /// assert_eq!(tree.get(root).unwrap().right().map(|n| n.id()), Some(dup));
    /// assert_eq!(tree.size(), 2);
    /// ```
    pub fn insert(&mut self, key: K) -> NodeId
    where
        K: Ord,
    {
        let mut slot = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.arena[id];
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal | Ordering::Greater => Side::Right,
            };
            slot = Some((id, side));
            current = node.child(side);
        }

        let parent = slot.map(|(parent, _)| parent);
        let id = self.arena.alloc(Node::leaf(key, parent));
        match slot {
            Some((parent, side)) => *self.arena[parent].child_mut(side) = Some(id),
            None => self.root = Some(id),
        }
        self.size += 1;

        trace!("inserted {:?} under {:?}, size is now {}", id, parent, self.size);
        id
    }

    /// Finds the first node on the search path whose key equals `key`. With duplicates present
    /// that is the one closest to the root.
    ///
    /// # Errors
    ///
    /// [`TreeError::Empty`] if the tree has no root, [`TreeError::NotFound`] if no node matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.search(&4).unwrap_err(), TreeError::Empty);
    ///
    /// tree.insert(3);
    /// tree.insert(4);
    /// assert_eq!(*tree.search(&4).unwrap().key(), 4);
    /// assert_eq!(tree.search(&42).unwrap_err(), TreeError::NotFound);
    /// ```
    pub fn search(&self, key: &K) -> Result<NodeRef<'_, K>, TreeError>
    where
        K: Ord,
    {
        self.locate(key).map(|id| NodeRef::new(self, id))
    }

    /// The node with the smallest key in the subtree rooted at `subtree`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] if `subtree` is `None` or no longer names a node.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// assert!(matches!(tree.minimum(tree.root()), Err(TreeError::InvalidArgument(_))));
    ///
    /// for key in [5, 3, 8, 1, 4] {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(*tree.minimum(tree.root()).unwrap().key(), 1);
    ///
    /// let three = tree.search(&3).unwrap();
    /// assert_eq!(*tree.minimum(three.right().map(|n| n.id())).unwrap().key(), 4);
    /// ```
    pub fn minimum(&self, subtree: Option<NodeId>) -> Result<NodeRef<'_, K>, TreeError> {
        let id = self.subtree_root(subtree)?;
        Ok(NodeRef::new(self, self.leftmost(id)))
    }

    /// The node with the largest key in the subtree rooted at `subtree`. When the largest key is
    /// duplicated this is the last of them inserted.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] if `subtree` is `None` or no longer names a node.
    pub fn maximum(&self, subtree: Option<NodeId>) -> Result<NodeRef<'_, K>, TreeError> {
        let id = self.subtree_root(subtree)?;
        Ok(NodeRef::new(self, self.rightmost(id)))
    }

    /// The node following `key`'s node in inorder, or `None` when it is the last. The walk starts
    /// from the node [`search`][Tree::search] finds, so with duplicates present the successor
    /// may have an equal key.
    ///
    /// # Errors
    ///
    /// The same as [`search`][Tree::search].
    pub fn inorder_successor(&self, key: &K) -> Result<Option<NodeRef<'_, K>>, TreeError>
    where
        K: Ord,
    {
        let id = self.locate(key)?;
        Ok(self.successor_of(id).map(|id| NodeRef::new(self, id)))
    }

    /// The node preceding `key`'s node in inorder, or `None` when it is the first.
    ///
    /// # Errors
    ///
    /// The same as [`search`][Tree::search].
    pub fn inorder_predecessor(&self, key: &K) -> Result<Option<NodeRef<'_, K>>, TreeError>
    where
        K: Ord,
    {
        let id = self.locate(key)?;
        Ok(self.predecessor_of(id).map(|id| NodeRef::new(self, id)))
    }

    /// Removes the node [`search`][Tree::search] finds for `key` and returns the key it held.
    ///
    /// A node with two children isn't unlinked itself. Its inorder successor is unlinked instead
    /// and the successor's key is moved up into it, so the node keeps its handle and position.
    /// Either way at most one child has to be reattached.
    ///
    /// # Errors
    ///
    /// The same as [`search`][Tree::search]. The tree is left untouched on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.delete(&1), Ok(1));
    ///
    /// assert_eq!(tree.size(), 0);
    /// assert_eq!(tree.root(), None);
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<K, TreeError>
    where
        K: Ord,
    {
        // Everything that can fail happens here, before the first write.
        let target = self.locate(key)?;

        let unlinked = match (self.arena[target].left, self.arena[target].right) {
            (Some(_), Some(right)) => self.leftmost(right),
            _ => target,
        };
        let (child, parent) = {
            let node = &self.arena[unlinked];
            debug_assert!(unlinked == target || node.left.is_none());
            (node.left.or(node.right), node.parent)
        };
        let side = parent.map(|parent| self.side_of(parent, unlinked));

        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        match (parent, side) {
            (Some(parent), Some(side)) => *self.arena[parent].child_mut(side) = child,
            _ => self.root = child,
        }
        let Some(removed) = self.arena.remove(unlinked) else {
            unreachable!("located node {:?} was not live", unlinked);
        };
        let key = if unlinked == target {
            removed.key
        } else {
            mem::replace(&mut self.arena[target].key, removed.key)
        };
        self.size -= 1;

        if cfg!(debug_assertions) {
            if let Some(child) = child {
                assert_eq!(self.arena[child].parent, parent);
            }
            if let (Some(parent), Some(side)) = (parent, side) {
                assert_eq!(self.arena[parent].child(side), child);
            }
            assert_eq!(self.arena.len(), self.size);
        }

        trace!(
            "deleted {:?} (unlinked {:?}), size is now {}",
            target,
            unlinked,
            self.size
        );
        Ok(key)
    }

    /// The keys of the subtree rooted at `subtree` in ascending order. An absent subtree, or a
    /// handle to a deleted node, yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [5, 3, 8, 1, 4] {
    ///     tree.insert(key);
    /// }
    ///
    /// let left = tree.get(tree.root().unwrap()).unwrap().left().map(|n| n.id());
    /// assert_eq!(tree.inorder(left).copied().collect::<Vec<_>>(), [1, 3, 4]);
    /// assert_eq!(tree.inorder(None).count(), 0);
    /// ```
    pub fn inorder(&self, subtree: Option<NodeId>) -> Inorder<'_, K> {
        Inorder::new(self, subtree.filter(|&id| self.arena.contains(id)))
    }

    /// The keys of the whole tree in ascending order.
    pub fn iter(&self) -> Inorder<'_, K> {
        Inorder::new(self, self.root)
    }

    pub(crate) fn arena(&self) -> &Arena<K> {
        &self.arena
    }

    fn locate(&self, key: &K) -> Result<NodeId, TreeError>
    where
        K: Ord,
    {
        let mut current = Some(self.root.ok_or(TreeError::Empty)?);
        while let Some(id) = current {
            let node = &self.arena[id];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return Ok(id),
                Ordering::Greater => node.right,
            };
        }
        Err(TreeError::NotFound)
    }

    fn subtree_root(&self, subtree: Option<NodeId>) -> Result<NodeId, TreeError> {
        let id = subtree.ok_or(TreeError::InvalidArgument("subtree root is absent"))?;
        if self.arena.contains(id) {
            Ok(id)
        } else {
            Err(TreeError::InvalidArgument("node is no longer in the tree"))
        }
    }

    fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        if self.arena[parent].left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(self.arena[parent].right, Some(child));
            Side::Right
        }
    }

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.arena[id].right {
            id = right;
        }
        id
    }

    /// The leftmost node of the right subtree if there is one. Otherwise the nearest ancestor
    /// reached by climbing out of a left subtree.
    pub(crate) fn successor_of(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour_of(id, Side::Right)
    }

    pub(crate) fn predecessor_of(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour_of(id, Side::Left)
    }

    fn neighbour_of(&self, id: NodeId, side: Side) -> Option<NodeId> {
        if let Some(child) = self.arena[id].child(side) {
            return Some(match side {
                Side::Left => self.rightmost(child),
                Side::Right => self.leftmost(child),
            });
        }

        let mut current = id;
        let mut parent = self.arena[id].parent;
        while let Some(ancestor) = parent {
            if self.arena[ancestor].child(side) != Some(current) {
                break;
            }
            current = ancestor;
            parent = self.arena[ancestor].parent;
        }
        parent
    }

    /// Checks every structural invariant, panicking on the first violation: BST ordering with
    /// ties to the right, parent/child agreement, and `size` matching both the reachable and the
    /// live node counts.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self)
    where
        K: Ord + fmt::Debug,
    {
        let mut reachable = 0;
        if let Some(root) = self.root {
            assert_eq!(self.arena[root].parent, None, "root has a parent");
        }
        // (node, inclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(NodeId, Option<&K>, Option<&K>)> =
            self.root.map(|id| (id, None, None)).into_iter().collect();
        while let Some((id, low, high)) = stack.pop() {
            reachable += 1;
            let node = &self.arena[id];
            if let Some(low) = low {
                assert!(low <= &node.key, "{:?} is left of {:?}", node.key, low);
            }
            if let Some(high) = high {
                assert!(&node.key < high, "{:?} is right of {:?}", node.key, high);
            }
            if let Some(left) = node.left {
                assert_eq!(self.arena[left].parent, Some(id), "bad parent link");
                stack.push((left, low, Some(&node.key)));
            }
            if let Some(right) = node.right {
                assert_eq!(self.arena[right].parent, Some(id), "bad parent link");
                stack.push((right, Some(&node.key), high));
            }
        }
        assert_eq!(reachable, self.size, "size doesn't match reachable nodes");
        assert_eq!(self.arena.len(), self.size, "size doesn't match live nodes");
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and to a count of each key.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes the tree holds exactly the keys (and duplicates) it should.
    fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, model: &mut BTreeMap<K, usize>)
    where
        K: Clone + Ord + fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    bst.insert(k.clone());
                    *model.entry(k.clone()).or_default() += 1;
                }
                Op::Delete(k) => {
                    let expected = match model.get_mut(k) {
                        Some(count) => {
                            *count -= 1;
                            if *count == 0 {
                                model.remove(k);
                            }
                            Ok(k.clone())
                        }
                        None if bst.is_empty() => Err(TreeError::Empty),
                        None => Err(TreeError::NotFound),
                    };
                    assert_eq!(bst.delete(k), expected);
                }
                Op::Iter => {
                    let expected = model
                        .iter()
                        .flat_map(|(k, &count)| std::iter::repeat(k).take(count));
                    assert!(bst.iter().eq(expected));
                }
            }
            bst.assert_invariants();
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut model = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut model);
            tree.size() == model.values().sum::<usize>()
                && model.keys().all(|key| tree.search(key).is_ok())
        }
    }

    quickcheck::quickcheck! {
        fn successor_walk_visits_everything(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }

            let mut sorted = xs;
            sorted.sort_unstable();

            // Walk node to node so duplicates are each visited once.
            let mut walked = Vec::new();
            let mut current = tree.root().map(|root| tree.leftmost(root));
            while let Some(id) = current {
                walked.push(*tree.get(id).unwrap().key());
                current = tree.successor_of(id);
            }
            walked == sorted
        }
    }

    quickcheck::quickcheck! {
        fn predecessor_walk_visits_everything(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }

            let mut sorted = xs;
            sorted.sort_unstable_by(|a, b| b.cmp(a));

            let mut walked = Vec::new();
            let mut current = tree.root().map(|root| tree.rightmost(root));
            while let Some(id) = current {
                walked.push(*tree.get(id).unwrap().key());
                current = tree.predecessor_of(id);
            }
            walked == sorted
        }
    }
}
