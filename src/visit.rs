//! Ready-made callbacks for [`LazyTree::traverse_live`][crate::LazyTree::traverse_live] and
//! [`LazyTree::traverse_all`][crate::LazyTree::traverse_all].

use std::fmt;

/// Writes `element` to standard output followed by a newline.
///
/// # Examples
///
/// ```
/// use lazy_bst::{visit, LazyTree};
///
/// let tree: LazyTree<_> = [2, 1, 3].into_iter().collect();
///
/// // Prints 1, 2 and 3 on their own lines.
/// tree.traverse_live(visit::print);
/// ```
pub fn print<T: fmt::Display>(element: &T) {
    println!("{element}");
}
