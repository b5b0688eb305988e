use thiserror::Error;

/// Ways an operation on a [`Tree`][crate::Tree] can fail. Every check happens before the tree is
/// touched so a failed call never leaves a partial mutation behind.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// A required argument was absent, e.g. `minimum(None)`, or a [`NodeId`][crate::NodeId] that
    /// no longer names a node in the tree.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The operation needs a root but the tree has none.
    #[error("the tree is empty")]
    Empty,
    /// No node in the tree has the requested key.
    #[error("key not found in the tree")]
    NotFound,
}
