//! Bit-granular I/O over byte streams.
//!
//! Bits are packed most-significant first. The writer holds at most one
//! partial byte; `flush` left-aligns it and pads the low-order side with
//! zeros. Fixed-width integers are written and read as raw big-endian
//! bytes, bypassing the bit accumulator.

use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// Writes individual bits to an underlying byte sink.
pub struct BitWriter<W: Write> {
    inner: W,
    buf: u8,
    nbits: u8,
    written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Wrap a byte sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: 0,
            nbits: 0,
            written: 0,
        }
    }

    /// Append one bit. A full byte is emitted as soon as eight bits are held.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.buf = (self.buf << 1) | bit as u8;
        self.nbits += 1;
        self.written += 1;
        if self.nbits == 8 {
            self.inner.write_all(&[self.buf])?;
            self.buf = 0;
            self.nbits = 0;
        }
        Ok(())
    }

    /// Append eight bits, most significant first.
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        for shift in (0..8).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    /// Write four raw big-endian bytes.
    ///
    /// # Errors
    /// Returns `Error::Unaligned` if bits are pending in the accumulator.
    pub fn write_fixed_int(&mut self, value: u32) -> Result<()> {
        if self.nbits != 0 {
            return Err(Error::Unaligned(self.nbits));
        }
        self.inner.write_all(&value.to_be_bytes())?;
        self.written += 32;
        Ok(())
    }

    /// Emit any pending bits, zero-padded on the low-order side, and flush
    /// the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        if self.nbits > 0 {
            let byte = self.buf << (8 - self.nbits);
            self.inner.write_all(&[byte])?;
            self.buf = 0;
            self.nbits = 0;
        }
        self.inner.flush()?;
        Ok(())
    }

    /// Number of bits accepted so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.written
    }

    /// Number of bits waiting for a full byte.
    pub fn pending_bits(&self) -> u8 {
        self.nbits
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.inner)
    }
}

/// Reads individual bits from an underlying byte source.
pub struct BitReader<R: Read> {
    inner: R,
    buf: u8,
    nbits: u8,
    read: u64,
}

impl<R: Read> BitReader<R> {
    /// Wrap a byte source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: 0,
            nbits: 0,
            read: 0,
        }
    }

    /// Read one bit, or `None` once the source is exhausted.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.nbits == 0 {
            match next_byte(&mut self.inner)? {
                Some(byte) => {
                    self.buf = byte;
                    self.nbits = 8;
                }
                None => return Ok(None),
            }
        }
        self.nbits -= 1;
        self.read += 1;
        Ok(Some((self.buf >> self.nbits) & 1 == 1))
    }

    /// Read eight bits, most significant first.
    ///
    /// Returns `None` if the source is exhausted before the first bit.
    ///
    /// # Errors
    /// Returns `Error::UnexpectedEof` if it runs out part-way through.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut value = match self.read_bit()? {
            Some(bit) => bit as u8,
            None => return Ok(None),
        };
        for _ in 1..8 {
            let bit = self.read_bit()?.ok_or(Error::UnexpectedEof)?;
            value = (value << 1) | bit as u8;
        }
        Ok(Some(value))
    }

    /// Read four raw big-endian bytes.
    ///
    /// This reads straight from the source; any bits left in the
    /// accumulator are not part of the value.
    ///
    /// # Errors
    /// Returns `Error::UnexpectedEof` if only one to three bytes remain.
    pub fn read_fixed_int(&mut self) -> Result<Option<u32>> {
        let mut bytes = [0u8; 4];
        for (i, slot) in bytes.iter_mut().enumerate() {
            match next_byte(&mut self.inner)? {
                Some(byte) => *slot = byte,
                None if i == 0 => return Ok(None),
                None => return Err(Error::UnexpectedEof),
            }
        }
        self.read += 32;
        Ok(Some(u32::from_be_bytes(bytes)))
    }

    /// Number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.read
    }

    /// Return the underlying source. Buffered bits are discarded.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

fn next_byte<R: Read>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bits_pack_msb_first() {
        let mut w = BitWriter::new(Vec::new());
        for bit in [true, false, true, true, false, false, false, true] {
            w.write_bit(bit).unwrap();
        }
        assert_eq!(w.pending_bits(), 0);
        assert_eq!(w.into_inner().unwrap(), vec![0b1011_0001]);
    }

    #[test]
    fn test_flush_pads_low_order_side() {
        let mut w = BitWriter::new(Vec::new());
        w.write_bit(true).unwrap();
        w.write_bit(true).unwrap();
        w.write_bit(false).unwrap();
        w.flush().unwrap();
        assert_eq!(w.bits_written(), 3);
        assert_eq!(w.get_ref(), &vec![0b1100_0000]);

        // Nothing pending: flush emits nothing.
        w.flush().unwrap();
        assert_eq!(w.get_ref().len(), 1);
    }

    #[test]
    fn test_fixed_int_is_raw_big_endian() {
        let mut w = BitWriter::new(Vec::new());
        w.write_fixed_int(976).unwrap();
        assert_eq!(w.into_inner().unwrap(), vec![0, 0, 0x03, 0xD0]);
    }

    #[test]
    fn test_fixed_int_rejects_pending_bits() {
        let mut w = BitWriter::new(Vec::new());
        w.write_bit(true).unwrap();
        assert!(matches!(w.write_fixed_int(1), Err(Error::Unaligned(1))));
    }

    #[test]
    fn test_mixed_sequence() {
        // Int, byte, six alternating bits, byte, bit, two bytes, four ones, byte.
        let mut w = BitWriter::new(Vec::new());
        w.write_fixed_int(976).unwrap();
        w.write_byte(b'b').unwrap();
        for i in 0..6 {
            w.write_bit(i % 2 == 0).unwrap();
        }
        w.write_byte(b'c').unwrap();
        w.write_bit(true).unwrap();
        w.write_byte(b'd').unwrap();
        w.write_byte(b'e').unwrap();
        for _ in 0..4 {
            w.write_bit(true).unwrap();
        }
        w.write_byte(b'f').unwrap();
        let bytes = w.into_inner().unwrap();

        let mut r = BitReader::new(Cursor::new(bytes));
        assert_eq!(r.read_fixed_int().unwrap(), Some(976));
        assert_eq!(r.read_byte().unwrap(), Some(b'b'));
        for i in 0..6 {
            assert_eq!(r.read_bit().unwrap(), Some(i % 2 == 0));
        }
        assert_eq!(r.read_byte().unwrap(), Some(b'c'));
        assert_eq!(r.read_bit().unwrap(), Some(true));
        assert_eq!(r.read_byte().unwrap(), Some(b'd'));
        assert_eq!(r.read_byte().unwrap(), Some(b'e'));
        for _ in 0..4 {
            assert_eq!(r.read_bit().unwrap(), Some(true));
        }
        assert_eq!(r.read_byte().unwrap(), Some(b'f'));
    }

    #[test]
    fn test_end_of_stream_is_not_an_error() {
        let mut r = BitReader::new(Cursor::new(vec![0xFF]));
        assert_eq!(r.read_byte().unwrap(), Some(0xFF));
        assert_eq!(r.read_bit().unwrap(), None);
        assert_eq!(r.read_byte().unwrap(), None);
        assert_eq!(r.read_fixed_int().unwrap(), None);
        assert_eq!(r.bits_read(), 8);
    }

    #[test]
    fn test_truncated_reads() {
        let mut r = BitReader::new(Cursor::new(vec![0x00, 0x01]));
        assert!(matches!(r.read_fixed_int(), Err(Error::UnexpectedEof)));

        let mut r = BitReader::new(Cursor::new(vec![0xAA]));
        r.read_bit().unwrap();
        assert!(matches!(r.read_byte(), Err(Error::UnexpectedEof)));
    }
}
