//! Compressed stream layout.
//!
//! ```text
//! +----------------+---------------------------+----------------------+-----+
//! | count: u32 BE  | tree header + `0`         | codewords, packed    | pad |
//! +----------------+---------------------------+----------------------+-----+
//!   4 raw bytes      omitted when count == 0     same bit stream        zeros
//! ```
//!
//! `count` is the number of symbols in the original input, which is what
//! bounds decoding: the payload carries no end marker, and a single-symbol
//! input has no payload bits at all.

use std::io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};

use tracing::{debug, trace};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::header::{header_bits, read_tree, write_tree};
use crate::tree::{CodingTrie, ALPHABET_SIZE};

pub use crate::tree::count_frequencies;

const SCAN_CHUNK: usize = 64 * 1024;

/// Statistics for one compress or decompress run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Symbols in the original input.
    pub symbols: u64,
    /// Distinct symbols, i.e. leaves of the trie.
    pub unique_symbols: usize,
    /// Height of the trie, `None` when it is empty.
    pub tree_height: Option<usize>,
    /// Bytes consumed.
    pub input_bytes: u64,
    /// Bytes produced.
    pub output_bytes: u64,
}

impl Summary {
    /// Output size over input size; `0.0` for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Count occurrences of each byte value until `reader` is exhausted.
///
/// Returns the table and the total number of bytes seen.
pub fn count_frequencies_from<R: Read>(mut reader: R) -> Result<([u64; ALPHABET_SIZE], u64)> {
    let mut freqs = [0u64; ALPHABET_SIZE];
    let mut total = 0u64;
    let mut chunk = vec![0u8; SCAN_CHUNK];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &b in &chunk[..n] {
            freqs[b as usize] += 1;
        }
        total += n as u64;
    }
    Ok((freqs, total))
}

/// Compress everything from the current position of `input` into `output`.
///
/// The input is read twice: once to count frequencies, then again from
/// the same position to encode.
///
/// # Errors
/// Returns `Error::InputTooLarge` if the input holds more than
/// `u32::MAX` bytes.
pub fn compress<R, W>(mut input: R, output: W) -> Result<Summary>
where
    R: Read + Seek,
    W: Write,
{
    let start = input.stream_position()?;
    let (freqs, total) = count_frequencies_from(&mut input)?;
    let count = u32::try_from(total).map_err(|_| Error::InputTooLarge(total))?;
    input.seek(SeekFrom::Start(start))?;

    let trie = CodingTrie::from_frequencies(&freqs);
    let unique_symbols = trie.leaf_count();
    let tree_height = trie.height();
    debug!(symbols = total, unique_symbols, ?tree_height, "built coding tree");

    let mut out = BitWriter::new(BufWriter::new(output));
    out.write_fixed_int(count)?;

    if count > 0 {
        write_tree(&trie, &mut out)?;
        trace!(bits = header_bits(&trie), "wrote tree header");

        let reader = BufReader::new(&mut input).take(total);
        for byte in reader.bytes() {
            trie.encode_symbol(byte?, &mut out)?;
        }
    }
    out.flush()?;

    let output_bytes = out.bits_written().div_ceil(8);
    trace!(bits = out.bits_written(), output_bytes, "wrote payload");

    Ok(Summary {
        symbols: total,
        unique_symbols,
        tree_height,
        input_bytes: total,
        output_bytes,
    })
}

/// Decompress a stream produced by [`compress`].
///
/// A zero-byte stream decodes to empty output, the same as a zero count.
///
/// # Errors
/// Returns `Error::UnexpectedEof` if the count or payload is cut short and
/// `Error::MalformedHeader` if symbols are expected but the tree header
/// does not close a root.
pub fn decompress<R, W>(input: R, output: W) -> Result<Summary>
where
    R: Read,
    W: Write,
{
    let mut input = BitReader::new(BufReader::new(input));
    // A stream that ends before the count is empty input; a count cut
    // short after 1 to 3 bytes is still an error.
    let Some(total) = input.read_fixed_int()? else {
        debug!("empty stream");
        return Ok(Summary::default());
    };

    let trie = if total > 0 {
        read_tree(&mut input)?
    } else {
        CodingTrie::empty()
    };
    if total > 0 && trie.is_empty() {
        return Err(Error::MalformedHeader);
    }
    let unique_symbols = trie.leaf_count();
    let tree_height = trie.height();
    debug!(symbols = total, unique_symbols, ?tree_height, "rebuilt coding tree");
    trace!(bits = input.bits_read() - 32, "read tree header");

    let mut out = BufWriter::new(output);
    for _ in 0..total {
        let symbol = trie.decode_symbol(&mut input)?;
        out.write_all(&[symbol])?;
    }
    out.flush()?;

    Ok(Summary {
        symbols: u64::from(total),
        unique_symbols,
        tree_height,
        input_bytes: input.bits_read().div_ceil(8),
        output_bytes: u64::from(total),
    })
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress(Cursor::new(data), &mut out)?;
    Ok(out)
}

/// Decompress an in-memory buffer.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress(data, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_layout() {
        let packed = compress_bytes(&[0x41, 0x41, 0x42]).unwrap();
        // count | 1 01000010 1 01000001 0 0 | 1 1 0 | pad
        assert_eq!(packed, vec![0x00, 0x00, 0x00, 0x03, 0xA1, 0x50, 0x4C]);
        assert_eq!(decompress_bytes(&packed).unwrap(), vec![0x41, 0x41, 0x42]);
    }

    #[test]
    fn test_empty_input() {
        let packed = compress_bytes(&[]).unwrap();
        assert_eq!(packed, vec![0, 0, 0, 0]);
        assert!(decompress_bytes(&packed).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol_input() {
        let packed = compress_bytes(b"aaaaa").unwrap();
        // count, then `1 01100001 0` padded to two bytes, no payload bits.
        assert_eq!(packed, vec![0, 0, 0, 5, 0b1011_0000, 0b1000_0000]);
        assert_eq!(decompress_bytes(&packed).unwrap(), b"aaaaa".to_vec());
    }

    #[test]
    fn test_decodes_exactly_count_symbols() {
        // Padding bits after the last codeword must not become extra output.
        let data = b"ab";
        let packed = compress_bytes(data).unwrap();
        assert_eq!(decompress_bytes(&packed).unwrap(), data.to_vec());
    }

    #[test]
    fn test_summary() {
        let data = b"she sells sea shells by the sea shore".repeat(8);
        let mut packed = Vec::new();
        let summary = compress(Cursor::new(&data), &mut packed).unwrap();
        assert_eq!(summary.symbols, data.len() as u64);
        assert_eq!(summary.output_bytes, packed.len() as u64);
        assert_eq!(summary.unique_symbols, 11);
        assert!(summary.ratio() < 1.0);

        let mut restored = Vec::new();
        let back = decompress(packed.as_slice(), &mut restored).unwrap();
        assert_eq!(restored, data);
        assert_eq!(back.input_bytes, packed.len() as u64);
        assert_eq!(back.unique_symbols, summary.unique_symbols);
        assert_eq!(back.tree_height, summary.tree_height);
    }

    #[test]
    fn test_compress_from_offset() {
        let mut cursor = Cursor::new(b"skipthis-payload".to_vec());
        cursor.set_position(9);
        let mut packed = Vec::new();
        compress(&mut cursor, &mut packed).unwrap();
        assert_eq!(decompress_bytes(&packed).unwrap(), b"payload".to_vec());
    }

    #[test]
    fn test_zero_byte_stream_is_empty_input() {
        assert!(decompress_bytes(&[]).unwrap().is_empty());

        let mut restored = Vec::new();
        let summary = decompress(&[][..], &mut restored).unwrap();
        assert!(restored.is_empty());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_truncated_count() {
        let cuts: [&[u8]; 3] = [&[0], &[0, 0], &[0, 0, 0]];
        for cut in cuts {
            assert!(matches!(decompress_bytes(cut), Err(Error::UnexpectedEof)));
        }
    }

    #[test]
    fn test_output_size_matches_header_bits() {
        let data = b"abracadabra";
        let trie = CodingTrie::from_bytes(data);
        let payload_bits: u64 = data
            .iter()
            .map(|&b| trie.codeword(b).unwrap().len() as u64)
            .sum();
        let packed = compress_bytes(data).unwrap();
        let expected = (32 + header_bits(&trie) + payload_bits).div_ceil(8);
        assert_eq!(packed.len() as u64, expected);
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            decompress_bytes(&[0, 0, 0, 3]),
            Err(Error::MalformedHeader)
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let packed = compress_bytes(data).unwrap();
        let cut = &packed[..packed.len() - 4];
        assert!(matches!(decompress_bytes(cut), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_frequencies_from_reader() {
        let data = vec![7u8; SCAN_CHUNK + 10];
        let (freqs, total) = count_frequencies_from(data.as_slice()).unwrap();
        assert_eq!(total, data.len() as u64);
        assert_eq!(freqs[7], data.len() as u64);
        assert_eq!(freqs, count_frequencies(&data));
    }
}
