//! Size limits and buffer sizing.

use crate::bitstream::MIN_CAPACITY;
use crate::config::Kind;
use crate::word::Word;

/// Bits of the list count header.
pub const LIST_LEN_BITS: u32 = 57;

/// Most values a list can hold: the largest 57-bit count.
pub const LIST_MAX_VALUES: u64 = (1 << LIST_LEN_BITS) - 1;

/// Most values a sequence of `kind` over `width`-bit values can hold.
///
/// Sets hold at most `2^width` values. For `width == 64` this saturates at
/// `u64::MAX`, which no `usize` length exceeds.
pub fn max_values(kind: Kind, width: u32) -> u64 {
    match kind {
        Kind::List => LIST_MAX_VALUES,
        Kind::Set => 1u64.checked_shl(width).unwrap_or(u64::MAX),
    }
}

/// Bits of the count header for `kind` over `width`-bit values.
pub(crate) fn header_bits(kind: Kind, width: u32) -> u32 {
    match kind {
        Kind::List => LIST_LEN_BITS,
        Kind::Set => width,
    }
}

/// Upper bound on the encoded size of `len` values of type `W`.
///
/// A split costs `bits_len(L) <= L` bits and a literal costs one field per
/// value, so the tree never exceeds `len * W::BITS` bits. The result is rounded
/// up to a multiple of 8 bytes and holds for any bit width and cluster settings.
pub fn max_encoded_size<W: Word>(kind: Kind, len: usize) -> usize {
    let bits = (len as u64)
        .saturating_mul(u64::from(W::BITS))
        .saturating_add(u64::from(header_bits(kind, W::BITS)));
    let bytes = bits.div_ceil(8);
    let rounded = bytes
        .div_ceil(MIN_CAPACITY as u64)
        .saturating_mul(MIN_CAPACITY as u64);
    usize::try_from(rounded).unwrap_or(usize::MAX).max(MIN_CAPACITY)
}
