//! Slot storage for tree nodes.
//!
//! Nodes reference each other by [`NodeId`] instead of pointers so the parent back-link is a
//! plain index and never a second owner. Freed slots are recycled through a free list; each slot
//! carries a generation that is bumped on free so an old `NodeId` can't resolve to whatever node
//! later lands in the same slot. A slot that has used up every generation is never reused.

use std::ops::{Index, IndexMut};

/// A handle to a node in a particular [`Tree`][crate::Tree]. Handles are cheap to copy and stay
/// valid until the node they name is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<K> Node<K> {
    /// A new leaf hanging off `parent`.
    pub(crate) fn leaf(key: K, parent: Option<NodeId>) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot<K> {
    generation: u32,
    node: Option<Node<K>>,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    free: Vec<usize>,
    live: usize,
}

impl<K> Default for Arena<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Stores `node`, reusing a freed slot when there is one.
    pub(crate) fn alloc(&mut self, node: Node<K>) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                debug_assert!(slot.node.is_none(), "free list pointed at a live slot");
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Frees the slot `id` names and hands back its node. Any copy of `id` is dead afterwards.
    ///
    /// A slot whose generation has run out is retired instead of recycled, so a generation is
    /// never handed out twice.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node<K>> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        self.live -= 1;
        if let Some(generation) = slot.generation.checked_add(1) {
            slot.generation = generation;
            self.free.push(id.index);
        }
        Some(node)
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.live
    }
}

/// Indexing is for ids the tree itself holds in a relation. Those always name live nodes so a
/// miss is a bug in the tree, not a caller error.
impl<K> Index<NodeId> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Node<K> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("{:?} does not name a live node", id),
        }
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("{:?} does not name a live node", id),
        }
    }
}
