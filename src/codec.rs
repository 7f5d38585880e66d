//! Per-symbol encoding and decoding.
//!
//! A codeword is the root-to-leaf path: `0` selects the left child, `1`
//! the right. Encoding climbs from the leaf through parent links and
//! replays the path in reverse; decoding descends from the root one bit
//! at a time.
//!
//! A trie with a single leaf has an empty codeword. Encoding that symbol
//! writes nothing and decoding returns it without touching the stream, so
//! the number of symbols must be known up front (the container stores it
//! in its header).

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::tree::CodingTrie;

impl CodingTrie {
    /// Root-to-leaf path of `symbol`, or `None` if it has no leaf.
    ///
    /// Only frequency-built tries have a leaf table; a trie rebuilt from a
    /// header returns `None` for every symbol.
    pub fn codeword(&self, symbol: u8) -> Option<Vec<bool>> {
        let mut path = self.path_to_root(self.leaf(symbol)?);
        path.reverse();
        Some(path)
    }

    /// Write the codeword of `symbol`.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` if the symbol has no leaf.
    pub fn encode_symbol<W: Write>(&self, symbol: u8, out: &mut BitWriter<W>) -> Result<()> {
        let leaf = self.leaf(symbol).ok_or(Error::UnknownSymbol(symbol))?;
        let mut path = self.path_to_root(leaf);
        while let Some(bit) = path.pop() {
            out.write_bit(bit)?;
        }
        Ok(())
    }

    /// Branch bits from `leaf` up to the root, leaf-to-root order.
    fn path_to_root(&self, mut id: NodeId) -> Vec<bool> {
        let mut path = Vec::new();
        while let Some(parent) = self.node(id).parent {
            path.push(self.node(parent).right == Some(id));
            id = parent;
        }
        path
    }

    /// Read one codeword and return its symbol.
    ///
    /// # Errors
    /// Returns `Error::EmptyTree` if the trie has no root and
    /// `Error::UnexpectedEof` if the stream ends inside a codeword.
    pub fn decode_symbol<R: Read>(&self, input: &mut BitReader<R>) -> Result<u8> {
        let mut id = self.root().ok_or(Error::EmptyTree)?;
        loop {
            let node = self.node(id);
            if node.is_leaf() {
                return Ok(node.symbol);
            }
            let bit = input.read_bit()?.ok_or(Error::UnexpectedEof)?;
            id = node.child(bit).ok_or(Error::MalformedHeader)?;
        }
    }
}
