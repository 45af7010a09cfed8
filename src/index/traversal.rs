use std::collections::VecDeque;
use crate::index::entry::IndexEntry;
use crate::index::tree::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    PreOrder,   // node, left, right
    InOrder,    // left, node, right
    PostOrder,  // left, right, node
    LevelOrder, // breadth-first
}

/// Lazy walk over an index tree. Uses an explicit stack or queue, so the
/// walk depth is not limited by the call stack.
pub struct Traversal<'a> {
    frontier: Frontier<'a>,
}

enum Frontier<'a> {
    Pre(Vec<&'a Node>),
    In {
        stack: Vec<&'a Node>,
        cursor: Option<&'a Node>,
    },
    Post(Vec<(&'a Node, bool)>),
    Level(VecDeque<&'a Node>),
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(root: Option<&'a Node>, order: TraversalOrder) -> Self {
        let frontier = match order {
            TraversalOrder::PreOrder => Frontier::Pre(root.into_iter().collect()),
            TraversalOrder::InOrder => Frontier::In {
                stack: Vec::new(),
                cursor: root,
            },
            TraversalOrder::PostOrder => {
                Frontier::Post(root.into_iter().map(|node| (node, false)).collect())
            }
            TraversalOrder::LevelOrder => Frontier::Level(root.into_iter().collect()),
        };
        Traversal { frontier }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a IndexEntry;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.frontier {
            Frontier::Pre(stack) => {
                let node = stack.pop()?;
                stack.extend(node.right.as_deref());
                stack.extend(node.left.as_deref());
                Some(&node.entry)
            }
            Frontier::In { stack, cursor } => {
                while let Some(node) = cursor.take() {
                    stack.push(node);
                    *cursor = node.left.as_deref();
                }
                let node = stack.pop()?;
                *cursor = node.right.as_deref();
                Some(&node.entry)
            }
            Frontier::Post(stack) => loop {
                let (node, expanded) = stack.pop()?;
                if expanded {
                    return Some(&node.entry);
                }
                stack.push((node, true));
                stack.extend(node.right.as_deref().map(|n| (n, false)));
                stack.extend(node.left.as_deref().map(|n| (n, false)));
            },
            Frontier::Level(queue) => {
                let node = queue.pop_front()?;
                queue.extend(node.left.as_deref());
                queue.extend(node.right.as_deref());
                Some(&node.entry)
            }
        }
    }
}
