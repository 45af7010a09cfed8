use std::cmp::Ordering;
use tracing::{debug, warn};
use crate::core::error::{Error, Result};
use crate::core::types::Position;
use crate::index::entry::IndexEntry;
use crate::index::traversal::{Traversal, TraversalOrder};

pub(crate) type Link = Option<Box<Node>>;

/// Tree node; children are owned exclusively by their parent
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) entry: IndexEntry,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    fn leaf(entry: IndexEntry) -> Box<Node> {
        Box::new(Node {
            entry,
            left: None,
            right: None,
        })
    }
}

/// Unbalanced binary search tree mapping unique keys to store positions.
///
/// Height depends entirely on insertion order, and sorted input degrades the
/// tree into a list. No operation recurses. Descents walk a `&mut Link`
/// cursor and whole-tree work (copy, traversal, teardown) keeps an explicit
/// stack.
#[derive(Debug, Default)]
pub struct IndexTree {
    root: Link,
    len: usize,
}

impl IndexTree {
    pub fn new() -> Self {
        IndexTree { root: None, len: 0 }
    }

    /// Build a tree by inserting `entries` in order. Duplicates are logged and skipped.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = IndexEntry>,
    {
        let mut tree = IndexTree::new();
        for entry in entries {
            // Rejections are already reported by insert
            let _ = tree.insert(entry);
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn insert(&mut self, entry: IndexEntry) -> Result<()> {
        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            cursor = match entry.cmp(&node.entry) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    warn!(key = %entry.key, "duplicate index key rejected");
                    return Err(Error::duplicate_key(&entry.key));
                }
            };
        }

        *cursor = Some(Node::leaf(entry));
        self.len += 1;
        Ok(())
    }

    /// Remove `key` and return the entry it mapped to
    pub fn remove(&mut self, key: &str) -> Result<IndexEntry> {
        let mut cursor = &mut self.root;
        loop {
            let ordering = match cursor.as_deref() {
                Some(node) => key.cmp(node.entry.key()),
                None => {
                    warn!(key, "index key not found for removal");
                    return Err(Error::key_not_found(key));
                }
            };
            match ordering {
                Ordering::Equal => break,
                Ordering::Less => {
                    if let Some(node) = cursor {
                        cursor = &mut node.left;
                    }
                }
                Ordering::Greater => {
                    if let Some(node) = cursor {
                        cursor = &mut node.right;
                    }
                }
            }
        }

        let Some(mut node) = cursor.take() else {
            return Err(Error::key_not_found(key));
        };

        // Only a node with two children has a successor to pull up
        let successor = if node.left.is_some() {
            take_leftmost(&mut node.right)
        } else {
            None
        };

        let removed = match successor {
            Some(successor) => {
                let removed = std::mem::replace(&mut node.entry, successor);
                *cursor = Some(node);
                removed
            }
            None => {
                *cursor = node.left.take().or_else(|| node.right.take());
                node.entry
            }
        };

        self.len -= 1;
        debug!(key, position = ?removed.position, "index entry removed");
        Ok(removed)
    }

    /// Position stored under `key`; `None` when the key is absent or unbound
    pub fn search(&self, key: &str) -> Option<Position> {
        self.get(key).and_then(|entry| entry.position)
    }

    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.entry.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.entry),
            };
        }
        None
    }

    pub fn min(&self) -> Option<&IndexEntry> {
        self.root.as_deref().map(|node| &leftmost(node).entry)
    }

    pub fn max(&self) -> Option<&IndexEntry> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.entry)
    }

    /// Number of levels; 0 for an empty tree
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|node| node.left.as_deref().into_iter().chain(node.right.as_deref()))
                .collect();
        }
        height
    }

    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_> {
        Traversal::new(self.root.as_deref(), order)
    }

    pub fn pre_order(&self) -> Traversal<'_> {
        self.traverse(TraversalOrder::PreOrder)
    }

    /// Ascending key order
    pub fn in_order(&self) -> Traversal<'_> {
        self.traverse(TraversalOrder::InOrder)
    }

    pub fn post_order(&self) -> Traversal<'_> {
        self.traverse(TraversalOrder::PostOrder)
    }

    pub fn level_order(&self) -> Traversal<'_> {
        self.traverse(TraversalOrder::LevelOrder)
    }

    pub fn visit_in_order<F>(&self, mut visitor: F)
    where
        F: FnMut(&IndexEntry),
    {
        for entry in self.in_order() {
            visitor(entry);
        }
    }

    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Release every node, children before parents
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            let left = node.left.take();
            let right = node.right.take();
            if left.is_none() && right.is_none() {
                continue;
            }
            pending.push(node);
            pending.extend(left);
            pending.extend(right);
        }
        self.len = 0;
    }
}

impl Clone for IndexTree {
    fn clone(&self) -> Self {
        IndexTree {
            root: copy_subtree(self.root.as_deref()),
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.root = copy_subtree(source.root.as_deref());
        self.len = source.len;
    }
}

impl Drop for IndexTree {
    fn drop(&mut self) {
        self.clear();
    }
}

impl FromIterator<IndexEntry> for IndexTree {
    fn from_iter<I: IntoIterator<Item = IndexEntry>>(iter: I) -> Self {
        IndexTree::from_entries(iter)
    }
}

fn leftmost(mut node: &Node) -> &Node {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node
}

/// Unlink the smallest node under `link`, splicing its right child into its place
fn take_leftmost(mut link: &mut Link) -> Option<IndexEntry> {
    while link.as_deref().is_some_and(|node| node.left.is_some()) {
        if let Some(node) = link {
            link = &mut node.left;
        }
    }

    let mut node = link.take()?;
    *link = node.right.take();
    Some(node.entry)
}

enum CopyStep<'a> {
    Visit(Option<&'a Node>),
    Build(&'a Node),
}

/// Post-order copy: children are built onto `built` before their parent pops them
fn copy_subtree(root: Option<&Node>) -> Link {
    let mut pending = vec![CopyStep::Visit(root)];
    let mut built: Vec<Link> = Vec::new();

    while let Some(step) = pending.pop() {
        match step {
            CopyStep::Visit(None) => built.push(None),
            CopyStep::Visit(Some(node)) => {
                pending.push(CopyStep::Build(node));
                pending.push(CopyStep::Visit(node.right.as_deref()));
                pending.push(CopyStep::Visit(node.left.as_deref()));
            }
            CopyStep::Build(node) => {
                let right = built.pop().flatten();
                let left = built.pop().flatten();
                built.push(Some(Box::new(Node {
                    entry: node.entry.clone(),
                    left,
                    right,
                })));
            }
        }
    }

    built.pop().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    fn tree_of(keys: &[&str]) -> IndexTree {
        let mut tree = IndexTree::new();
        for (i, key) in keys.iter().enumerate() {
            tree.insert(IndexEntry::new(key, Position(i))).unwrap();
        }
        tree
    }

    fn keys(traversal: Traversal<'_>) -> Vec<String> {
        traversal.map(|e| e.key.clone()).collect()
    }

    #[test]
    fn test_search_returns_inserted_position() {
        let tree = tree_of(&["m", "c", "x", "a", "e"]);
        assert_eq!(tree.search("m"), Some(Position(0)));
        assert_eq!(tree.search("e"), Some(Position(4)));
        assert_eq!(tree.search("z"), None);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_duplicate_insert_keeps_original() {
        let mut tree = tree_of(&["m", "c"]);
        let shape_before = keys(tree.pre_order());

        let err = tree.insert(IndexEntry::new("c", Position(42))).unwrap_err();

        assert_eq!(err.kind, ErrorKind::DuplicateKey);
        assert_eq!(tree.search("c"), Some(Position(1)));
        assert_eq!(tree.len(), 2);
        assert_eq!(keys(tree.pre_order()), shape_before);
    }

    #[test]
    fn test_remove_leaf_and_single_child() {
        //     m
        //    / \
        //   c   x
        //  /
        // a
        let mut tree = tree_of(&["m", "c", "x", "a"]);

        assert_eq!(tree.remove("c").unwrap().position, Some(Position(1)));
        assert_eq!(keys(tree.pre_order()), vec!["m", "a", "x"]);

        tree.remove("x").unwrap();
        assert_eq!(keys(tree.pre_order()), vec!["m", "a"]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        //      m
        //    /   \
        //   c     x
        //        /
        //       p
        //        \
        //         r
        let mut tree = tree_of(&["m", "c", "x", "p", "r"]);

        let removed = tree.remove("m").unwrap();

        assert_eq!(removed.key, "m");
        assert_eq!(keys(tree.pre_order()), vec!["p", "c", "x", "r"]);
        assert_eq!(tree.search("p"), Some(Position(3)));
        assert_eq!(tree.search("m"), None);
    }

    #[test]
    fn test_remove_missing_key() {
        let mut tree = tree_of(&["b", "a"]);
        assert_eq!(tree.remove("q").unwrap_err().kind, ErrorKind::KeyNotFound);
        assert_eq!(tree.len(), 2);

        let mut empty = IndexTree::new();
        assert_eq!(empty.remove("q").unwrap_err().kind, ErrorKind::KeyNotFound);
    }

    #[test]
    fn test_traversal_orders() {
        //       d
        //      / \
        //     b   f
        //    / \   \
        //   a   c   g
        let tree = tree_of(&["d", "b", "f", "a", "c", "g"]);

        assert_eq!(keys(tree.pre_order()), vec!["d", "b", "a", "c", "f", "g"]);
        assert_eq!(keys(tree.in_order()), vec!["a", "b", "c", "d", "f", "g"]);
        assert_eq!(keys(tree.post_order()), vec!["a", "c", "b", "g", "f", "d"]);
        assert_eq!(keys(tree.level_order()), vec!["d", "b", "f", "a", "c", "g"]);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_min_max() {
        let tree = tree_of(&["d", "b", "f", "a", "g"]);
        assert_eq!(tree.min().unwrap().key, "a");
        assert_eq!(tree.max().unwrap().key, "g");
        assert!(IndexTree::new().min().is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = tree_of(&["d", "b", "f"]);
        let mut copy = original.deep_copy();

        copy.remove("b").unwrap();
        copy.insert(IndexEntry::new("z", Position(9))).unwrap();
        original.remove("f").unwrap();

        assert_eq!(keys(original.in_order()), vec!["b", "d"]);
        assert_eq!(keys(copy.in_order()), vec!["d", "f", "z"]);
    }

    #[test]
    fn test_clone_from_replaces_contents() {
        let source = tree_of(&["b", "a"]);
        let mut target = tree_of(&["x", "y", "z"]);

        target.clone_from(&source);

        assert_eq!(target.len(), 2);
        assert_eq!(keys(target.pre_order()), vec!["b", "a"]);
    }

    #[test]
    fn test_clear_resets_tree() {
        let mut tree = tree_of(&["d", "b", "f"]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.in_order().count(), 0);

        tree.insert(IndexEntry::new("a", Position(0))).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_sorted_keys_do_not_exhaust_stack() {
        const N: usize = 20_000;
        let key = |i: usize| format!("{:08}", i);

        // Ascending keys chain every node onto the right spine
        let mut tree = IndexTree::new();
        for i in 0..N {
            tree.insert(IndexEntry::new(&key(i), Position(i))).unwrap();
        }
        assert_eq!(tree.len(), N);
        assert_eq!(tree.height(), N);
        assert_eq!(tree.search(&key(N - 1)), Some(Position(N - 1)));
        assert_eq!(
            tree.insert(IndexEntry::new(&key(N - 1), Position(0))).unwrap_err().kind,
            ErrorKind::DuplicateKey
        );

        let copy = tree.deep_copy();
        assert_eq!(copy.in_order().count(), N);
        assert_eq!(copy.height(), N);

        // Deepest node first, then every remaining key from the root down
        assert_eq!(tree.remove(&key(N - 1)).unwrap().position, Some(Position(N - 1)));
        for i in 0..N - 1 {
            assert_eq!(tree.remove(&key(i)).unwrap().position, Some(Position(i)));
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);

        assert_eq!(copy.len(), N);
        assert_eq!(copy.max().unwrap().key, key(N - 1));
        drop(copy);
    }

    #[test]
    fn test_remove_successor_with_right_child() {
        //    d
        //   / \
        //  b   h
        //     /
        //    e
        //     \
        //      f
        let mut tree = tree_of(&["d", "b", "h", "e", "f"]);

        tree.remove("d").unwrap();

        assert_eq!(keys(tree.pre_order()), vec!["e", "b", "h", "f"]);
        assert_eq!(tree.len(), 4);
    }
}
