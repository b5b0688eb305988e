//! A Binary Search Tree over any totally ordered key type, with parent
//! links so a node can find its inorder neighbours without a stack.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! may have child `Node`s. The invariants this tree keeps are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a
//!    key strictly less than its own key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a
//!    key greater than or equal to its own key. Equal keys are allowed
//!    and always land on the right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`, where `height` is the longest path from
//! the root `Node` to a leaf `Node`. This tree does no rebalancing, so the
//! height depends only on insertion order: random keys give roughly
//! `O(lg N)` while sorted keys give a linked list of height `N`.
//!
//! ## Nodes and handles
//!
//! Nodes live in an arena owned by the [`Tree`] and point at each other
//! through [`NodeId`]s, so the parent link is a plain index and never a
//! second owner. Lookups return a [`NodeRef`], a borrowed view that can
//! walk to the parent and children. A `NodeId` stops resolving once its
//! node is deleted.
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4] {
//!     tree.insert(key);
//! }
//!
//! let four = tree.search(&4).unwrap();
//! assert_eq!(four.parent().map(|n| *n.key()), Some(3));
//! assert_eq!(*tree.minimum(tree.root()).unwrap().key(), 1);
//! assert_eq!(*tree.maximum(tree.root()).unwrap().key(), 8);
//! ```
//!
//! A `Tree` has no interior mutability. Sharing one between threads that
//! also mutate it needs an external lock such as `RwLock<Tree<K>>`.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
mod error;
mod iter;
mod node;
mod tree;


pub use arena::NodeId;
pub use error::TreeError;
pub use iter::Inorder;
pub use node::NodeRef;
pub use tree::Tree;
