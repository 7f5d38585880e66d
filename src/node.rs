//! Arena nodes of the coding trie.

/// Index of a node in its trie's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the coding trie.
///
/// Children are owned by the arena, so `left`, `right` and `parent` are
/// plain indices. A node is a leaf iff it has no children; internal nodes
/// always have both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeNode {
    /// Frequency. Zero for nodes rebuilt from a header.
    pub count: u64,
    /// Leaf symbol, or the symbol inherited from the first-merged child.
    pub symbol: u8,
    /// Child reached by a `0` bit.
    pub left: Option<NodeId>,
    /// Child reached by a `1` bit.
    pub right: Option<NodeId>,
    /// Back-reference, `None` at the root.
    pub parent: Option<NodeId>,
}

impl CodeNode {
    pub(crate) fn leaf(symbol: u8, count: u64) -> Self {
        Self {
            count,
            symbol,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub(crate) fn internal(symbol: u8, count: u64, left: NodeId, right: NodeId) -> Self {
        Self {
            count,
            symbol,
            left: Some(left),
            right: Some(right),
            parent: None,
        }
    }

    /// True if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The child selected by one code bit.
    pub fn child(&self, bit: bool) -> Option<NodeId> {
        if bit {
            self.right
        } else {
            self.left
        }
    }
}
