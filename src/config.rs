//! Knobs for a [`LazyTree`][crate::LazyTree].
//!
//! # Examples
//!
//! ```
//! use lazy_bst::{Config, LazyTree, Promotion};
//!
//! let tree: LazyTree<i32> = LazyTree::with_config(Config {
//!     promotion: Promotion::ForceLive,
//! });
//! assert_eq!(tree.config().promotion, Promotion::ForceLive);
//! ```

/// Configuration carried by every tree. `LazyTree::new` uses [`Config::default`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// What happens to the tombstone flag of a node that absorbs its successor's key during a
    /// two-child hard removal.
    pub promotion: Promotion,
}

/// Tombstone policy for the node that takes over its in-order successor's key when a node
/// with two children is hard-removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Promotion {
    /// The absorbing node takes the successor's own tombstone state. A tombstoned successor
    /// stays tombstoned under its new position.
    #[default]
    Inherit,
    /// The absorbing node is always made live, even when the successor was tombstoned. This
    /// can bring a logically deleted key back.
    ForceLive,
}

impl Promotion {
    /// Whether the absorbing node ends up tombstoned given the successor's flag.
    pub(crate) fn tombstoned(self, successor_tombstoned: bool) -> bool {
        match self {
            Self::Inherit => successor_tombstoned,
            Self::ForceLive => false,
        }
    }
}
