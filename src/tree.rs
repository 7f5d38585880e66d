//! Coding trie construction.
//!
//! Leaves are merged through a min-priority queue keyed by
//! `(count, symbol)`. An internal node takes the symbol of the first node
//! popped, so every live queue entry carries a distinct symbol and the
//! ordering is total: two builds from the same table yield the same trie.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::{CodeNode, NodeId};

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Count occurrences of each byte value.
pub fn count_frequencies(data: &[u8]) -> [u64; ALPHABET_SIZE] {
    let mut freqs = [0u64; ALPHABET_SIZE];
    for &b in data {
        freqs[b as usize] += 1;
    }
    freqs
}

/// Priority-queue ordering key: smallest count first, then smallest symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct QueueKey {
    count: u64,
    symbol: u8,
    id: NodeId,
}

/// A Huffman coding trie.
///
/// Nodes live in an arena owned by the trie and are released together
/// when it is dropped.
#[derive(Clone, Debug)]
pub struct CodingTrie {
    nodes: Vec<CodeNode>,
    root: Option<NodeId>,
    leaves: [Option<NodeId>; ALPHABET_SIZE],
}

impl CodingTrie {
    /// An empty trie: no root, no leaves.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            leaves: [None; ALPHABET_SIZE],
        }
    }

    /// Build a trie from per-byte frequencies.
    ///
    /// An all-zero table yields an empty trie; a single non-zero entry
    /// yields a trie whose root is that lone leaf.
    pub fn from_frequencies(freqs: &[u64; ALPHABET_SIZE]) -> Self {
        let mut trie = Self::empty();
        let mut queue = BinaryHeap::new();

        for (symbol, &count) in freqs.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let symbol = symbol as u8;
            let id = trie.push(CodeNode::leaf(symbol, count));
            trie.leaves[symbol as usize] = Some(id);
            queue.push(Reverse(QueueKey { count, symbol, id }));
        }

        loop {
            let Some(Reverse(first)) = queue.pop() else {
                break;
            };
            let Some(Reverse(second)) = queue.pop() else {
                trie.root = Some(first.id);
                break;
            };

            let count = first.count.saturating_add(second.count);
            let id = trie.join(first.symbol, count, first.id, second.id);
            queue.push(Reverse(QueueKey {
                count,
                symbol: first.symbol,
                id,
            }));
        }

        trie
    }

    /// Count the bytes of `data` and build a trie from the result.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_frequencies(&count_frequencies(data))
    }

    /// Root of the trie, `None` if empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a node.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this trie; see [`CodingTrie::get`].
    pub fn node(&self, id: NodeId) -> &CodeNode {
        &self.nodes[id.index()]
    }

    /// Look up a node, `None` if `id` is out of range for this trie.
    pub fn get(&self, id: NodeId) -> Option<&CodeNode> {
        self.nodes.get(id.index())
    }

    /// Leaf for `symbol`. Only populated for frequency-built tries.
    pub fn leaf(&self, symbol: u8) -> Option<NodeId> {
        self.leaves[symbol as usize]
    }

    /// True if the trie has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of leaves reachable from the root.
    pub fn leaf_count(&self) -> usize {
        self.walk().filter(|&(id, _)| self.node(id).is_leaf()).count()
    }

    /// Longest root-to-leaf path in edges. `None` for an empty trie.
    pub fn height(&self) -> Option<usize> {
        self.walk().map(|(_, depth)| depth).max()
    }

    /// Codeword length of every symbol with a leaf, indexed by symbol.
    pub fn code_lengths(&self) -> [Option<usize>; ALPHABET_SIZE] {
        let mut lengths = [None; ALPHABET_SIZE];
        for (id, depth) in self.walk() {
            let node = self.node(id);
            if node.is_leaf() {
                lengths[node.symbol as usize] = Some(depth);
            }
        }
        lengths
    }

    /// Depth-first walk yielding `(node, depth)` pairs, without recursion.
    fn walk(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();
        std::iter::from_fn(move || {
            let (id, depth) = stack.pop()?;
            let node = self.node(id);
            if let (Some(left), Some(right)) = (node.left, node.right) {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
            Some((id, depth))
        })
    }

    pub(crate) fn push(&mut self, node: CodeNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create an internal node over two existing subtrees and set their parents.
    pub(crate) fn join(&mut self, symbol: u8, count: u64, left: NodeId, right: NodeId) -> NodeId {
        let id = self.push(CodeNode::internal(symbol, count, left, right));
        self.nodes[left.index()].parent = Some(id);
        self.nodes[right.index()].parent = Some(id);
        id
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }
}

impl Default for CodingTrie {
    fn default() -> Self {
        Self::empty()
    }
}
