/// Errors raised by the lookups of a [`LazyTree`][crate::LazyTree]. Every other
/// operation is total and reports what it did with a `bool`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No live node matches. This covers keys that were never inserted as well as keys whose
    /// node is still in the tree but tombstoned.
    #[error("no live element matches the key")]
    NotFound,
    /// The tree has no nodes at all, live or tombstoned.
    #[error("the tree is empty")]
    EmptyTree,
}
