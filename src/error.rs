/// Errors returned by fallible [`AvlTree`] queries and operations.
///
/// Internal structural defects (a balance factor out of range, a stale cached
/// height) are never reported through this type; they panic.
///
/// [`AvlTree`]: crate::AvlTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested key is not present in the tree.
    #[error("key not found")]
    KeyNotFound,

    /// The operation requires a non-empty tree.
    #[error("tree is empty")]
    EmptyTree,

    /// A range was given with a lower bound greater than its upper bound.
    #[error("invalid range: lower bound is greater than the upper bound")]
    InvalidRange,
}
