//! Bit masks and bit-length helpers.
//!
//! Both tables are built at compile time. `BITS_SIZE_MASK[n]` has the low `n`
//! bits set (`n` in `0..=64`), `BITS_POS_MASK[i]` has only bit `i` set.

/// All-ones masks indexed by field size.
pub const BITS_SIZE_MASK: [u64; 65] = build_size_masks();

/// Single-bit masks indexed by bit position.
pub const BITS_POS_MASK: [u64; 64] = build_pos_masks();

const fn build_size_masks() -> [u64; 65] {
    let mut masks = [0u64; 65];
    let mut n = 1;
    while n < 64 {
        masks[n] = (1u64 << n) - 1;
        n += 1;
    }
    masks[64] = u64::MAX;
    masks
}

const fn build_pos_masks() -> [u64; 64] {
    let mut masks = [0u64; 64];
    let mut i = 0;
    while i < 64 {
        masks[i] = 1u64 << i;
        i += 1;
    }
    masks
}

/// Number of bits needed to represent `value` (0 for 0).
///
/// A zero count in `[0, length]` is stored in `bits_len_u64(length)` bits.
#[inline]
pub fn bits_len_u64(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

/// Return true if a cluster of `length` values at `bit_pos` holds every value
/// of its `2^bit_pos` range.
#[inline]
pub fn is_full_subtree(length: usize, bit_pos: u32) -> bool {
    bit_pos < 64 && length as u64 == BITS_POS_MASK[bit_pos as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_masks_cover_every_width() {
        assert_eq!(BITS_SIZE_MASK[0], 0);
        assert_eq!(BITS_SIZE_MASK[1], 1);
        assert_eq!(BITS_SIZE_MASK[8], 0xff);
        assert_eq!(BITS_SIZE_MASK[57], (1u64 << 57) - 1);
        assert_eq!(BITS_SIZE_MASK[64], u64::MAX);
    }

    #[test]
    fn pos_masks() {
        assert_eq!(BITS_POS_MASK[0], 1);
        assert_eq!(BITS_POS_MASK[7], 0x80);
        assert_eq!(BITS_POS_MASK[63], 1u64 << 63);
    }

    #[test]
    fn bit_lengths() {
        assert_eq!(bits_len_u64(0), 0);
        assert_eq!(bits_len_u64(1), 1);
        assert_eq!(bits_len_u64(2), 2);
        assert_eq!(bits_len_u64(5), 3);
        assert_eq!(bits_len_u64(12), 4);
        assert_eq!(bits_len_u64(u64::MAX), 64);
    }

    #[test]
    fn full_subtrees() {
        assert!(is_full_subtree(1, 0));
        assert!(is_full_subtree(8, 3));
        assert!(!is_full_subtree(7, 3));
        assert!(!is_full_subtree(usize::MAX, 64));
    }
}
