//! Unsigned element types the codec is instantiated for.

use std::fmt::Debug;
use std::hash::Hash;

/// An unsigned integer element of an encoded sequence.
///
/// The codec is written once against this trait and monomorphized for
/// `u8`, `u16`, `u32` and `u64`.
pub trait Word: Copy + Ord + Hash + Default + Debug + Send + Sync + 'static {
    /// Width of the type in bits.
    const BITS: u32;

    /// Widen to `u64`.
    fn to_u64(self) -> u64;

    /// Narrow from `u64`, dropping bits above `Self::BITS`.
    fn from_u64(value: u64) -> Self;
}

macro_rules! implement_word {
    ($word_type:ty) => {
        impl Word for $word_type {
            const BITS: u32 = <$word_type>::BITS;

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_u64(value: u64) -> Self {
                value as $word_type
            }
        }
    };
}

implement_word!(u8);
implement_word!(u16);
implement_word!(u32);
implement_word!(u64);
