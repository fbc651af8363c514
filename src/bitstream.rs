//! Bit-level writer and reader over caller-owned byte buffers.
//!
//! Fields are packed least-significant-bit first, starting at bit 0 of the
//! first byte, and multi-byte words are stored little-endian. Both sides keep a
//! 64-bit shift register, so a single field may be up to [`MAX_BITS`] wide:
//! at most 7 bits of a partial byte plus 57 new bits always fit in one register.
//! Wider values go through [`BitWriter::write_wide`] and [`BitReader::read_wide`],
//! which split them into a 57-bit chunk and a remainder.

use crate::bits::BITS_SIZE_MASK;
use crate::error::{Error, Result};

/// Widest field a single `write` or `read` call accepts.
pub const MAX_BITS: u32 = 57;

/// Smallest buffer a [`BitWriter`] accepts: one full register of bytes.
pub const MIN_CAPACITY: usize = 8;

/// Packs variable-width fields into a fixed-capacity byte buffer.
///
/// Only bytes below the final [`BitWriter::close`] size are ever written.
#[derive(Debug)]
pub struct BitWriter<'a> {
    buf: &'a mut [u8],
    /// Next byte to store.
    pos: usize,
    /// Pending bits, lowest bit first.
    acc: u64,
    acc_bits: u32,
}

impl<'a> BitWriter<'a> {
    /// Wrap `buf`. Fails with [`Error::BufferTooSmall`] below [`MIN_CAPACITY`] bytes.
    pub fn new(buf: &'a mut [u8]) -> Result<Self> {
        if buf.len() < MIN_CAPACITY {
            return Err(Error::BufferTooSmall {
                capacity: buf.len(),
                required: MIN_CAPACITY,
            });
        }
        Ok(Self {
            buf,
            pos: 0,
            acc: 0,
            acc_bits: 0,
        })
    }

    /// Merge the low `n_bits` of `value` into the register without storing.
    ///
    /// The caller must `flush` before the pending bits would exceed 64.
    #[inline]
    pub fn append(&mut self, value: u64, n_bits: u32) {
        debug_assert!(n_bits <= MAX_BITS);
        debug_assert!(self.acc_bits + n_bits <= 64);
        if n_bits == 0 {
            return;
        }
        self.acc |= (value & BITS_SIZE_MASK[n_bits as usize]) << self.acc_bits;
        self.acc_bits += n_bits;
    }

    /// Append `n_bits` (at most [`MAX_BITS`]) and store every completed byte.
    #[inline]
    pub fn write(&mut self, value: u64, n_bits: u32) -> Result<()> {
        self.append(value, n_bits);
        self.flush()
    }

    /// Write a field of up to 64 bits, low 57 bits first.
    pub fn write_wide(&mut self, value: u64, n_bits: u32) -> Result<()> {
        if n_bits <= MAX_BITS {
            return self.write(value, n_bits);
        }
        self.write(value, MAX_BITS)?;
        self.write(value >> MAX_BITS, n_bits - MAX_BITS)
    }

    /// Store the complete bytes held in the register; a partial byte stays pending.
    pub fn flush(&mut self) -> Result<()> {
        let n_bytes = (self.acc_bits / 8) as usize;
        if n_bytes == 0 {
            return Ok(());
        }
        let end = self.pos + n_bytes;
        if end > self.buf.len() {
            return Err(Error::EndOfStream);
        }
        self.buf[self.pos..end].copy_from_slice(&self.acc.to_le_bytes()[..n_bytes]);
        self.pos += n_bytes;
        self.acc = self.acc.checked_shr(n_bytes as u32 * 8).unwrap_or(0);
        self.acc_bits -= n_bytes as u32 * 8;
        Ok(())
    }

    /// Number of bytes written so far, counting a pending partial byte.
    pub fn size(&self) -> usize {
        self.pos + self.acc_bits.div_ceil(8) as usize
    }

    /// Flush everything, including a trailing partial byte, and return the
    /// total number of bytes written.
    pub fn close(mut self) -> Result<usize> {
        self.flush()?;
        if self.acc_bits > 0 {
            if self.pos >= self.buf.len() {
                return Err(Error::EndOfStream);
            }
            self.buf[self.pos] = self.acc as u8;
            self.pos += 1;
            self.acc = 0;
            self.acc_bits = 0;
        }
        Ok(self.pos)
    }
}

/// Extracts variable-width fields from a byte buffer.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buf: &'a [u8],
    /// Next byte to load.
    pos: usize,
    /// Lookahead bits, lowest bit first.
    acc: u64,
    acc_bits: u32,
}

impl<'a> BitReader<'a> {
    /// Read fields from `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            acc: 0,
            acc_bits: 0,
        }
    }

    /// Refill the register with as many whole bytes as it has room for.
    fn load(&mut self) -> Result<()> {
        let remaining = self.buf.len() - self.pos;
        if remaining == 0 {
            return Err(Error::EndOfStream);
        }
        let room = ((64 - self.acc_bits) / 8) as usize;
        let n_bytes = room.min(remaining);
        if n_bytes == 0 {
            return Ok(());
        }

        let word = if remaining >= 8 {
            let bytes: [u8; 8] = self.buf[self.pos..self.pos + 8]
                .try_into()
                .map_err(|_| Error::EndOfStream)?;
            u64::from_le_bytes(bytes)
        } else {
            self.buf[self.pos..]
                .iter()
                .enumerate()
                .fold(0u64, |w, (i, &b)| w | (u64::from(b) << (8 * i)))
        };

        let word = word & BITS_SIZE_MASK[n_bytes * 8];
        self.acc |= word << self.acc_bits;
        self.acc_bits += n_bytes as u32 * 8;
        self.pos += n_bytes;
        Ok(())
    }

    /// Read an `n_bits`-wide field (at most [`MAX_BITS`]).
    #[inline]
    pub fn read(&mut self, n_bits: u32) -> Result<u64> {
        debug_assert!(n_bits <= MAX_BITS);
        if n_bits == 0 {
            return Ok(0);
        }
        if n_bits > self.acc_bits {
            self.load()?;
            if n_bits > self.acc_bits {
                return Err(Error::NotEnoughBits {
                    requested: n_bits,
                    available: self.acc_bits,
                });
            }
        }
        let value = self.acc & BITS_SIZE_MASK[n_bits as usize];
        self.acc >>= n_bits;
        self.acc_bits -= n_bits;
        Ok(value)
    }

    /// Read a field of up to 64 bits written by [`BitWriter::write_wide`].
    pub fn read_wide(&mut self, n_bits: u32) -> Result<u64> {
        if n_bits <= MAX_BITS {
            return self.read(n_bits);
        }
        let low = self.read(MAX_BITS)?;
        let high = self.read(n_bits - MAX_BITS)?;
        Ok(low | (high << MAX_BITS))
    }

    /// Bytes consumed so far, rounding a partially read byte up.
    pub fn size(&self) -> usize {
        let consumed_bits = self.pos * 8 - self.acc_bits as usize;
        consumed_bits.div_ceil(8)
    }
}
