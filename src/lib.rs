//! # Static Huffman Coding
//!
//! *Prefix-free codes from byte frequencies, with a self-describing tree header.*
//!
//! ## Intuition First
//!
//! Morse code gives the most common letter, `E`, a single dot. Huffman
//! coding does the same thing optimally: frequent bytes get short
//! codewords, rare bytes get long ones, and no codeword is a prefix of
//! another, so a stream of them can be split without separators.
//!
//! The codewords are paths in a binary tree. Every byte is a leaf; going
//! left writes a `0`, going right writes a `1`. Decoding walks the same
//! tree from the root until it lands on a leaf.
//!
//! ## The Problem
//!
//! The decoder has to rebuild *exactly* the tree the encoder used. Two
//! things make that work here:
//! - **Deterministic construction**: ties in the priority queue break on
//!   symbol value, and merged nodes inherit the symbol of the first node
//!   popped, so the same frequency table always yields the same tree.
//! - **Shape header**: instead of shipping frequencies, the tree shape is
//!   written bit by bit in post-order, which a stack rebuilds in one pass.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Fano        Shannon-Fano coding: top-down splitting, not optimal
//! 1952  Huffman     Bottom-up merging: optimal prefix codes
//! 1978  Gallager    Adaptive Huffman coding
//! 1993  Katz        DEFLATE pairs LZ77 with canonical Huffman
//! ```
//!
//! ## Mathematical Formulation
//!
//! For symbols with probabilities $p_s$ and codeword lengths $\ell_s$,
//! Huffman's algorithm minimizes the expected length
//!
//! ```text
//! L = Σ p_s · ℓ_s,    H(p) ≤ L < H(p) + 1
//! ```
//!
//! subject to the Kraft equality $\sum 2^{-\ell_s} = 1$ for a full tree.
//!
//! ## Complexity Analysis
//!
//! - **Build**: $O(n \log n)$ for $n \le 256$ distinct symbols.
//! - **Encode / decode**: $O(\ell_s)$ per symbol, at most 255 steps.
//! - **Header**: $10n - 1$ bits plus one terminator bit.
//!
//! ## Failure Modes
//!
//! 1. **Single symbol**: the only leaf is the root, so its codeword is
//!    empty. The stored symbol count is what bounds decoding.
//! 2. **Truncation**: a cut stream surfaces as [`Error::UnexpectedEof`];
//!    there is no resynchronization.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`bitio`]: MSB-first bit reader and writer over `std::io` streams.
//! - [`tree`] and [`node`]: the arena-backed coding trie and its builder.
//! - [`header`]: tree shape serialization.
//! - [`codec`]: per-symbol encode and decode on a [`CodingTrie`].
//! - [`container`]: the full compressed stream (count, header, payload).
//!
//! ```
//! let packed = huffpack::compress_bytes(b"abracadabra")?;
//! assert_eq!(huffpack::decompress_bytes(&packed)?, b"abracadabra");
//! # Ok::<(), huffpack::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Cover, T. M. & Thomas, J. A. (2006). *Elements of Information Theory*, ch. 5.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitio;
pub mod codec;
pub mod container;
pub mod error;
pub mod header;
pub mod node;
pub mod tree;

pub use bitio::{BitReader, BitWriter};
pub use container::{compress, compress_bytes, decompress, decompress_bytes, Summary};
pub use error::{Error, Result};
pub use node::{CodeNode, NodeId};
pub use tree::CodingTrie;
