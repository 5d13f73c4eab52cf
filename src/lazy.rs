//! A BST with lazy deletion. [`LazyTree::remove`] only marks a node as deleted (a
//! "tombstone") and leaves the structure alone. Tombstoned nodes are invisible to lookups and
//! iteration but still take up room in the tree until [`LazyTree::collect_garbage`] (or a
//! [`LazyTree::remove_hard`] of that key) splices them out for real.
//!
//! The tree tracks two sizes:
//!
//! - the "soft" size ([`LazyTree::size`]) is the number of live elements,
//! - the "hard" size ([`LazyTree::hard_size`]) is the number of nodes, tombstoned or not.
//!
//! The tree never rebalances itself.
//!
//! # Examples
//!
//! ```
//! use lazy_bst::{Error, LazyTree};
//!
//! let mut tree = LazyTree::new();
//! tree.insert(5);
//! tree.insert(3);
//! tree.insert(8);
//!
//! // Lazily removing a key hides it but keeps its node around.
//! assert!(tree.remove(&3));
//! assert_eq!(tree.find(&3), Err(Error::NotFound));
//! assert_eq!(tree.size(), 2);
//! assert_eq!(tree.hard_size(), 3);
//!
//! // Inserting it again just clears the tombstone.
//! assert!(tree.insert(3));
//! assert_eq!(tree.hard_size(), 3);
//!
//! // Garbage collection gets rid of tombstoned nodes for good.
//! tree.remove(&8);
//! assert!(tree.collect_garbage());
//! assert_eq!(tree.hard_size(), 2);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::config::{Config, Promotion};
use crate::error::Error;
use crate::iter::{Iter, IterAll};

/// An exclusively owned, possibly empty, subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree whose removals are lazy. This can be used for inserting,
/// finding, and removing elements, and for purging removed elements in bulk.
pub struct LazyTree<T> {
    root: Link<T>,
    sizes: Sizes,
    config: Config,
}

/// The two counters every tree keeps in sync with its nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Sizes {
    /// Nodes that aren't tombstoned.
    soft: usize,
    /// All nodes.
    hard: usize,
}

impl Sizes {
    /// Counts the nodes reachable from `link`.
    fn count<T>(link: &Link<T>) -> Self {
        IterAll::new(link.as_deref()).fold(Self::default(), |sizes, (_, tombstoned)| Self {
            soft: sizes.soft + usize::from(!tombstoned),
            hard: sizes.hard + 1,
        })
    }
}

/// What an insert did to the node holding the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Insertion {
    /// A new node was linked into an empty slot.
    Created,
    /// The key's node was tombstoned and is live again.
    Revived,
    /// The key was already live.
    Present,
}

impl<T> Default for LazyTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LazyTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Clone for LazyTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let root = self.root.clone();
        let sizes = Sizes::count(&root);
        debug_assert_eq!(sizes, self.sizes);
        Self {
            root,
            sizes,
            config: self.config,
        }
    }
}

impl<T> fmt::Debug for LazyTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyTree")
            .field("size", &self.sizes.soft)
            .field("hard_size", &self.sizes.hard)
            .field("root", &self.root)
            .finish()
    }
}

impl<T: Ord> FromIterator<T> for LazyTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for LazyTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, T> IntoIterator for &'a LazyTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> LazyTree<T> {
    /// Generates a new, empty `LazyTree` with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Generates a new, empty `LazyTree` that behaves according to `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            root: None,
            sizes: Sizes::default(),
            config,
        }
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Whether the tree has no live elements. Tombstoned nodes may still be present.
    pub fn is_empty(&self) -> bool {
        self.sizes.soft == 0
    }

    /// The number of live elements (the "soft" size).
    pub fn size(&self) -> usize {
        self.sizes.soft
    }

    /// The number of nodes, including tombstoned ones (the "hard" size).
    pub fn hard_size(&self) -> usize {
        self.sizes.hard
    }

    /// The number of edges on the longest path from the root to a leaf, counting tombstoned
    /// nodes. An empty tree has a height of -1 and a single node has a height of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree = LazyTree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.extend([5, 3, 8, 1, 4, 7, 9]);
    /// assert_eq!(tree.height(), 2);
    ///
    /// // Height is structural so lazy removal doesn't change it.
    /// tree.remove(&1);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> isize {
        Node::height(&self.root)
    }

    /// Returns the smallest live element.
    ///
    /// A tombstoned node doesn't hide live elements past it: the search keeps going until it
    /// finds something live or runs out of nodes.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there are no nodes and [`Error::NotFound`] if every node is
    /// tombstoned.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree: LazyTree<_> = [1, 2, 3].into_iter().collect();
    /// tree.remove(&1);
    ///
    /// assert_eq!(tree.find_min(), Ok(&2));
    /// ```
    pub fn find_min(&self) -> Result<&T, Error> {
        self.root()?.find_min().ok_or(Error::NotFound)
    }

    /// Returns the largest live element. See [`LazyTree::find_min`].
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there are no nodes and [`Error::NotFound`] if every node is
    /// tombstoned.
    pub fn find_max(&self) -> Result<&T, Error> {
        self.root()?.find_max().ok_or(Error::NotFound)
    }

    /// Returns the key of the leftmost node whether or not it is tombstoned.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there are no nodes.
    pub fn find_min_hard(&self) -> Result<&T, Error> {
        Ok(&self.root()?.min_hard().key)
    }

    /// Returns the key of the rightmost node whether or not it is tombstoned.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there are no nodes.
    pub fn find_max_hard(&self) -> Result<&T, Error> {
        Ok(&self.root()?.max_hard().key)
    }

    /// Calls `visit` on every live element in order.
    pub fn traverse_live<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        Node::traverse(&self.root, &mut visit, false);
    }

    /// Calls `visit` on the key of every node in order, tombstoned or not.
    pub fn traverse_all<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        Node::traverse(&self.root, &mut visit, true);
    }

    /// An in-order iterator over the live elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref())
    }

    /// An in-order iterator over every node's key and whether it is tombstoned.
    pub fn iter_all(&self) -> IterAll<'_, T> {
        IterAll::new(self.root.as_deref())
    }

    /// Discards every node.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            size = self.sizes.soft,
            hard_size = self.sizes.hard,
            "clear"
        );

        // Dropping the root directly would recurse once per level which a skewed tree can
        // turn into a stack overflow.
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.sizes = Sizes::default();
    }

    fn root(&self) -> Result<&Node<T>, Error> {
        self.root.as_deref().ok_or(Error::EmptyTree)
    }
}

impl<T: Ord> LazyTree<T> {
    /// Returns the live element equal to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no node for `key` or its node is tombstoned.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::{Error, LazyTree};
    ///
    /// let mut tree = LazyTree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Ok(&1));
    /// assert_eq!(tree.find(&42), Err(Error::NotFound));
    /// ```
    pub fn find(&self, key: &T) -> Result<&T, Error> {
        self.root
            .as_deref()
            .and_then(|root| root.find(key))
            .ok_or(Error::NotFound)
    }

    /// Whether a live element equal to `key` is in the tree.
    pub fn contains(&self, key: &T) -> bool {
        self.find(key).is_ok()
    }

    /// Inserts `key`. If its node exists but is tombstoned, the tombstone is cleared instead of
    /// adding a second node. Returns whether the number of live elements changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree = LazyTree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    ///
    /// tree.remove(&1);
    /// assert!(tree.insert(1));
    /// assert_eq!(tree.hard_size(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        let insertion = match self.root.as_deref_mut() {
            Some(root) => root.insert(key),
            None => {
                self.root = Some(Node::new_boxed(key));
                Insertion::Created
            }
        };

        match insertion {
            Insertion::Created => {
                self.sizes.soft += 1;
                self.sizes.hard += 1;
            }
            Insertion::Revived => self.sizes.soft += 1,
            Insertion::Present => {}
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(?insertion, size = self.sizes.soft, "insert");

        self.check_invariants();
        insertion != Insertion::Present
    }

    /// Lazily removes `key` by tombstoning its node. The structure of the tree doesn't change.
    /// Returns whether the number of live elements changed, which is `false` when the key is
    /// missing or already tombstoned.
    pub fn remove(&mut self, key: &T) -> bool {
        let removed = self
            .root
            .as_deref_mut()
            .map_or(false, |root| root.remove(key));
        if removed {
            self.sizes.soft -= 1;
        }

        self.check_invariants();
        removed
    }

    /// Unlinks the node for `key` from the tree whether or not it is tombstoned.
    ///
    /// A node with two children takes over the key of its in-order successor (the leftmost
    /// node of its right subtree) and the successor's node is unlinked instead. What happens
    /// to the tombstone of the node taking over is decided by [`Config::promotion`].
    ///
    /// Returns whether the number of live elements changed. Unlinking a tombstoned node returns
    /// `false` even though [`LazyTree::hard_size`] drops.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree: LazyTree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert!(tree.remove_hard(&5));
    /// assert_eq!(tree.hard_size(), 2);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 8]);
    /// ```
    pub fn remove_hard(&mut self, key: &T) -> bool {
        let before = self.sizes;
        Node::remove_hard(&mut self.root, key, &mut self.sizes, self.config.promotion);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            unlinked = self.sizes.hard != before.hard,
            size = self.sizes.soft,
            hard_size = self.sizes.hard,
            "remove_hard"
        );

        self.check_invariants();
        self.sizes.soft != before.soft
    }

    /// Unlinks every tombstoned node. Children are collected before their parent. Returns
    /// whether any node was unlinked.
    ///
    /// Afterwards [`LazyTree::size`] and [`LazyTree::hard_size`] agree.
    pub fn collect_garbage(&mut self) -> bool {
        let before = self.sizes;
        Node::collect_garbage(&mut self.root, &mut self.sizes, self.config.promotion);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            collected = before.hard - self.sizes.hard,
            hard_size = self.sizes.hard,
            "collect_garbage"
        );

        self.check_invariants();
        debug_assert_eq!(self.sizes.soft, self.sizes.hard);
        self.sizes.hard != before.hard
    }

    /// In tests, after every mutation, assert that the ordering holds and the counters match
    /// the nodes.
    fn check_invariants(&self) {
        if cfg!(test) {
            let mut keys = self.iter_all().map(|(key, _)| key);
            if let Some(mut prev) = keys.next() {
                for key in keys {
                    assert!(prev < key, "in-order keys must be strictly increasing");
                    prev = key;
                }
            }
            assert_eq!(Sizes::count(&self.root), self.sizes);
            assert!(self.sizes.soft <= self.sizes.hard);
        }
    }
}

/// A key, its two exclusively owned subtrees, and whether it has been lazily removed.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) key: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) tombstoned: bool,
}

impl<T> Node<T> {
    fn new_boxed(key: T) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            tombstoned: false,
        })
    }

    fn height(link: &Link<T>) -> isize {
        link.as_deref().map_or(-1, |node| {
            1 + Self::height(&node.left).max(Self::height(&node.right))
        })
    }

    fn live_key(&self) -> Option<&T> {
        (!self.tombstoned).then_some(&self.key)
    }

    /// Left subtree first, then this node, then the right subtree. Either side may be fully
    /// tombstoned so every branch has to be tried.
    fn find_min(&self) -> Option<&T> {
        self.left
            .as_deref()
            .and_then(Self::find_min)
            .or_else(|| self.live_key())
            .or_else(|| self.right.as_deref().and_then(Self::find_min))
    }

    fn find_max(&self) -> Option<&T> {
        self.right
            .as_deref()
            .and_then(Self::find_max)
            .or_else(|| self.live_key())
            .or_else(|| self.left.as_deref().and_then(Self::find_max))
    }

    fn min_hard(&self) -> &Self {
        self.left.as_deref().map_or(self, Self::min_hard)
    }

    fn max_hard(&self) -> &Self {
        self.right.as_deref().map_or(self, Self::max_hard)
    }

    fn traverse<F>(link: &Link<T>, visit: &mut F, include_tombstoned: bool)
    where
        F: FnMut(&T),
    {
        if let Some(node) = link {
            Self::traverse(&node.left, visit, include_tombstoned);
            if include_tombstoned || !node.tombstoned {
                visit(&node.key);
            }
            Self::traverse(&node.right, visit, include_tombstoned);
        }
    }

    /// Unlinks the node in `link` and puts whatever keeps the ordering intact in its place:
    /// nothing, its only child, or itself holding its successor's key.
    fn splice(link: &mut Link<T>, sizes: &mut Sizes, promotion: Promotion) {
        let Some(mut node) = link.take() else {
            return;
        };

        // Whichever node ends up unlinked, there is one fewer.
        sizes.hard -= 1;
        if !node.tombstoned {
            sizes.soft -= 1;
        }

        *link = match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                let (successor, right) = Self::detach_min(right);
                let Node {
                    key,
                    tombstoned: successor_tombstoned,
                    ..
                } = *successor;
                if !successor_tombstoned {
                    sizes.soft -= 1;
                }

                node.key = key;
                node.tombstoned = promotion.tombstoned(successor_tombstoned);
                if !node.tombstoned {
                    sizes.soft += 1;
                }

                node.left = Some(left);
                node.right = right;
                Some(node)
            }
        };
    }

    /// Walks the leftmost path of `root` and returns the node at the end of it along with what
    /// remains of the subtree once it's gone. The detached node has no children.
    fn detach_min(mut root: Box<Self>) -> (Box<Self>, Link<T>) {
        match root.left.take() {
            None => {
                let rest = root.right.take();
                (root, rest)
            }
            Some(left) => {
                let (min, rest) = Self::detach_min(left);
                root.left = rest;
                (min, Some(root))
            }
        }
    }

    /// Post-order so that, by the time a node is spliced, nothing under it is tombstoned.
    fn collect_garbage(link: &mut Link<T>, sizes: &mut Sizes, promotion: Promotion) {
        let Some(node) = link.as_deref_mut() else {
            return;
        };
        Self::collect_garbage(&mut node.left, sizes, promotion);
        Self::collect_garbage(&mut node.right, sizes, promotion);
        if node.tombstoned {
            Self::splice(link, sizes, promotion);
        }
    }
}

impl<T: Ord> Node<T> {
    fn find(&self, key: &T) -> Option<&T> {
        match key.cmp(&self.key) {
            Ordering::Less => self.left.as_deref().and_then(|n| n.find(key)),
            Ordering::Equal => self.live_key(),
            Ordering::Greater => self.right.as_deref().and_then(|n| n.find(key)),
        }
    }

    fn insert(&mut self, key: T) -> Insertion {
        match key.cmp(&self.key) {
            Ordering::Less => match self.left.as_deref_mut() {
                Some(left) => left.insert(key),
                None => {
                    self.left = Some(Self::new_boxed(key));
                    Insertion::Created
                }
            },
            Ordering::Equal if self.tombstoned => {
                self.tombstoned = false;
                Insertion::Revived
            }
            Ordering::Equal => Insertion::Present,
            Ordering::Greater => match self.right.as_deref_mut() {
                Some(right) => right.insert(key),
                None => {
                    self.right = Some(Self::new_boxed(key));
                    Insertion::Created
                }
            },
        }
    }

    /// Tombstones the node for `key`. Returns `true` if it was live.
    fn remove(&mut self, key: &T) -> bool {
        match key.cmp(&self.key) {
            Ordering::Less => self.left.as_deref_mut().map_or(false, |n| n.remove(key)),
            Ordering::Equal => !std::mem::replace(&mut self.tombstoned, true),
            Ordering::Greater => self.right.as_deref_mut().map_or(false, |n| n.remove(key)),
        }
    }

    fn remove_hard(link: &mut Link<T>, key: &T, sizes: &mut Sizes, promotion: Promotion) {
        let Some(node) = link.as_deref_mut() else {
            return;
        };
        match key.cmp(&node.key) {
            Ordering::Less => Self::remove_hard(&mut node.left, key, sizes, promotion),
            Ordering::Equal => Self::splice(link, sizes, promotion),
            Ordering::Greater => Self::remove_hard(&mut node.right, key, sizes, promotion),
        }
    }
}
