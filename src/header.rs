//! Tree header serialization.
//!
//! The trie shape is written in post-order: a leaf is a `1` bit followed by
//! its 8-bit symbol, an internal node is a single `0` bit. One extra `0`
//! follows the traversal. On the way back in, each `0` joins the two most
//! recently completed subtrees on a stack; a `0` that finds a single
//! subtree there marks it as the root and ends the header.
//!
//! ```text
//!        *            post-order: B A *
//!       / \           bits:       1 01000010  1 01000001  0  0
//!      B   A                      leaf B      leaf A      *  end
//! ```

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::node::{CodeNode, NodeId};
use crate::tree::CodingTrie;

/// Write the shape of `trie` followed by the terminating `0` bit.
///
/// An empty trie is written as the terminator alone.
pub fn write_tree<W: Write>(trie: &CodingTrie, out: &mut BitWriter<W>) -> Result<()> {
    let mut stack: Vec<(NodeId, bool)> = trie.root().map(|r| (r, false)).into_iter().collect();

    while let Some((id, expanded)) = stack.pop() {
        let node = trie.node(id);
        match (node.left, node.right) {
            (Some(left), Some(right)) if !expanded => {
                stack.push((id, true));
                stack.push((right, false));
                stack.push((left, false));
            }
            (Some(_), Some(_)) => out.write_bit(false)?,
            _ => {
                out.write_bit(true)?;
                out.write_byte(node.symbol)?;
            }
        }
    }

    out.write_bit(false)
}

/// Exact size in bits of what [`write_tree`] emits for `trie`.
pub fn header_bits(trie: &CodingTrie) -> u64 {
    let leaves = trie.leaf_count() as u64;
    let internal = leaves.saturating_sub(1);
    leaves * 9 + internal + 1
}

/// Rebuild a trie from a serialized header.
///
/// Reading stops at the root-closing `0`, at a `0` seen with nothing on
/// the stack, or when the stream runs out. The header is not validated:
/// if it never closes a single root, the returned trie is empty.
/// Rebuilt nodes carry a zero count and the leaf table is left empty.
pub fn read_tree<R: Read>(input: &mut BitReader<R>) -> Result<CodingTrie> {
    let mut trie = CodingTrie::empty();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut expect_marker = true;

    loop {
        if !expect_marker {
            let symbol = match input.read_byte() {
                Ok(Some(symbol)) => symbol,
                Ok(None) | Err(Error::UnexpectedEof) => break,
                Err(e) => return Err(e),
            };
            stack.push(trie.push(CodeNode::leaf(symbol, 0)));
            expect_marker = true;
            continue;
        }

        match input.read_bit()? {
            None => break,
            Some(true) => expect_marker = false,
            Some(false) => match stack.len() {
                0 => break,
                1 => {
                    if let Some(root) = stack.pop() {
                        trie.set_root(root);
                    }
                    break;
                }
                _ => {
                    let (Some(a), Some(b)) = (stack.pop(), stack.pop()) else {
                        break;
                    };
                    let symbol = trie.node(b).symbol;
                    stack.push(trie.join(symbol, 0, b, a));
                }
            },
        }
    }

    Ok(trie)
}
