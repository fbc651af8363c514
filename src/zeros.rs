//! Zero counting at a bit position over a sorted run.
//!
//! Inside a cluster every value shares the bits above `bit_pos`, so sortedness
//! forces bit `bit_pos` to read `0...0 1...1` along the slice. The boundary is
//! found by binary search in $O(\log n)$ probes.

use crate::bits::BITS_POS_MASK;
use crate::word::Word;

/// Count the leading values of `values` whose bit `bit_pos` is clear.
///
/// `values` must be monotone in that bit (see the module docs). Returns 0 for
/// an empty slice. On input that breaks the precondition the result is still
/// within `0..=values.len()`.
#[inline]
pub fn count_zeros_at_bit<W: Word>(values: &[W], bit_pos: u32) -> usize {
    debug_assert!(bit_pos < W::BITS);
    let mask = BITS_POS_MASK[bit_pos as usize];
    values.partition_point(|v| v.to_u64() & mask == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slice() {
        assert_eq!(count_zeros_at_bit::<u32>(&[], 5), 0);
    }

    #[test]
    fn boundaries() {
        let values: [u8; 6] = [0b000, 0b001, 0b011, 0b100, 0b101, 0b111];
        assert_eq!(count_zeros_at_bit(&values, 2), 3);
        assert_eq!(count_zeros_at_bit(&values[..3], 1), 2);
        assert_eq!(count_zeros_at_bit(&values[3..], 1), 2);
        assert_eq!(count_zeros_at_bit(&values[..2], 0), 1);
    }

    #[test]
    fn all_zero_or_all_one() {
        let low = [1u64, 2, 3];
        assert_eq!(count_zeros_at_bit(&low, 63), 3);
        let high = [1u64 << 63, (1 << 63) | 7];
        assert_eq!(count_zeros_at_bit(&high, 63), 0);
    }

    #[test]
    fn matches_linear_scan() {
        let values: Vec<u16> = (0..1000u16).map(|i| i * 37).collect();
        for bit in 0..15u32 {
            for prefix in [0u32, 1, 3, 7] {
                let run: Vec<u16> = values
                    .iter()
                    .copied()
                    .filter(|&v| u32::from(v) >> (bit + 1) == prefix)
                    .collect();
                let expected = run.iter().filter(|&&v| v & (1 << bit) == 0).count();
                assert_eq!(count_zeros_at_bit(&run, bit), expected);
            }
        }
    }
}
