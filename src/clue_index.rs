//! The detective's notebook: an ordered set of collected clues.
//!
//! Backed by a plain (unbalanced) binary search tree keyed by clue text.
//! Clue counts are bounded by the number of rooms, so the tree never gets
//! deep enough for balancing to matter.

use std::cmp::Ordering;

#[derive(Debug)]
struct ClueNode {
    clue: String,
    left: Option<Box<ClueNode>>,
    right: Option<Box<ClueNode>>,
}

impl ClueNode {
    fn leaf(clue: String) -> Box<Self> {
        Box::new(Self {
            clue,
            left: None,
            right: None,
        })
    }
}

/// Ordered set of clue strings. Enumeration is always in ascending
/// lexicographic order, whatever the insertion order was.
#[derive(Debug, Default)]
pub struct ClueIndex {
    root: Option<Box<ClueNode>>,
    len: usize,
}

impl ClueIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match membership test.
    #[must_use]
    pub fn contains(&self, clue: &str) -> bool {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match clue.cmp(node.clue.as_str()) {
                Ordering::Equal => return true,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// Inserts `clue` at the first empty slot found by descending the tree.
    ///
    /// Returns `false` and leaves the index untouched if the clue was
    /// already present.
    pub fn insert(&mut self, clue: impl Into<String>) -> bool {
        let clue = clue.into();
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match clue.as_str().cmp(node.clue.as_str()) {
                Ordering::Equal => return false,
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
            };
        }
        *slot = Some(ClueNode::leaf(clue));
        self.len += 1;
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lazy in-order traversal. Each call starts a fresh walk.
    #[must_use]
    pub fn iter(&self) -> InOrder<'_> {
        let mut walk = InOrder { stack: Vec::new() };
        walk.push_left_spine(self.root.as_deref());
        walk
    }
}

impl<'a> IntoIterator for &'a ClueIndex {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Left subtree, node, right subtree; driven by an explicit stack.
#[derive(Debug)]
pub struct InOrder<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.clue.as_str())
    }
}
