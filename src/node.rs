use std::fmt;

use crate::arena::NodeId;
use crate::tree::Tree;

/// A borrowed view of one node in a [`Tree`]. This is what lookups hand back: it can report the
/// node's key and walk to its parent and children, but it can't change anything.
///
/// # Examples
///
/// ```
/// use linked_bst::Tree;
///
/// let mut tree = Tree::new();
/// for key in [5, 3, 8] {
///     tree.insert(key);
/// }
///
/// let three = tree.search(&3).unwrap();
/// assert_eq!(three.parent().map(|p| *p.key()), Some(5));
/// assert!(three.is_leaf());
/// ```
pub struct NodeRef<'a, K> {
    tree: &'a Tree<K>,
    id: NodeId,
}

impl<'a, K> Clone for NodeRef<'a, K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            id: self.id,
        }
    }
}
impl<'a, K> Copy for NodeRef<'a, K> {}

impl<'a, K> NodeRef<'a, K> {
    /// The caller guarantees `id` is live in `tree`.
    pub(crate) fn new(tree: &'a Tree<K>, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The handle for this node. It can be passed back to the tree (e.g. to
    /// [`Tree::minimum`]) for as long as the node isn't deleted.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The key stored in this node.
    pub fn key(&self) -> &'a K {
        &self.tree.arena()[self.id].key
    }

    /// The node this one hangs off of. `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.relative(self.tree.arena()[self.id].parent)
    }

    /// The left child, whose subtree holds strictly smaller keys.
    pub fn left(&self) -> Option<Self> {
        self.relative(self.tree.arena()[self.id].left)
    }

    /// The right child, whose subtree holds keys greater than or equal to this one.
    pub fn right(&self) -> Option<Self> {
        self.relative(self.tree.arena()[self.id].right)
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        let node = &self.tree.arena()[self.id];
        node.left.is_none() && node.right.is_none()
    }

    fn relative(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.tree, id))
    }
}

impl<'a, K> PartialEq for NodeRef<'a, K> {
    /// Two views are equal when they are the same node of the same tree, not merely equal keys.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}
impl<'a, K> Eq for NodeRef<'a, K> {}

/// Shows this node's key and the handles of its neighbours, not their subtrees, so formatting
/// never recurses down the tree.
impl<'a, K> fmt::Debug for NodeRef<'a, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.tree.arena()[self.id];
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("key", &node.key)
            .field("parent", &node.parent)
            .field("left", &node.left)
            .field("right", &node.right)
            .finish()
    }
}
