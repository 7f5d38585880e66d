//! Error types for Huffman coding.

use thiserror::Error;

/// Error variants for Huffman operations.
///
/// Running out of input exactly at a bit, byte or integer boundary is not
/// an error: the bit channel reports it as `Ok(None)`. The variants here
/// cover everything else.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream ended in the middle of a byte, integer or codeword.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// The tree header did not resolve to a single root.
    #[error("malformed tree header")]
    MalformedHeader,

    /// A symbol was requested from a trie with no root.
    #[error("coding tree is empty")]
    EmptyTree,

    /// The symbol has no leaf in the trie.
    #[error("symbol {0:#04x} has no codeword")]
    UnknownSymbol(u8),

    /// A raw integer was written while bits were still pending.
    #[error("fixed-width write with {0} pending bits")]
    Unaligned(u8),

    /// The symbol count does not fit the 32-bit header field.
    #[error("input too large: {0} symbols")]
    InputTooLarge(u64),

    /// An I/O error occurred during encoding or decoding.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
