//! Bit-cluster-tree decoder.
//!
//! Mirrors [`crate::encode`]: the same level walk, reading what the encoder
//! wrote. The walk finds each level's clusters in the partially rebuilt
//! output, whose higher bits are already final.
//!
//! Every output slot is written explicitly. The root's visit covers the
//! whole output, each split rewrites both halves with their prefixes, and
//! leaves, literals and full subtrees write their final values. So the
//! caller's buffer contents never matter.

use crate::bits::bits_len_u64;
use crate::bitstream::BitReader;
use crate::config::{Config, Kind};
use crate::error::{Error, Result};
use crate::limits::{max_values, LIST_LEN_BITS};
use crate::tree::{walk_levels, BitCluster, ClusterVisitor, Step};
use crate::word::Word;

/// Decode `input` into `out`.
///
/// `out.len()` must equal the encoded count (see [`decoded_size`]) and
/// `config` must match the one used to encode. Truncated or corrupt input
/// fails with [`Error::WrongFormat`]; on error the contents of `out` are
/// unspecified.
pub fn decode<W: Word>(input: &[u8], config: &Config, out: &mut [W]) -> Result<()> {
    let width = config.effective_width::<W>()?;
    let kind = config.kind();
    let max = max_values(kind, width);
    if out.len() as u64 > max {
        return Err(Error::OutputTooBig {
            len: out.len(),
            max,
        });
    }

    let mut reader = BitReader::new(input);
    let len = read_len(&mut reader, kind, width)?;
    if len != out.len() {
        return Err(Error::WrongFormat(format!(
            "encoded count {len} does not match output length {}",
            out.len()
        )));
    }

    let len = out.len();
    let mut decoder = TreeDecoder { reader, out };
    walk_levels(&mut decoder, config.tree_shape(), len, width, 0).map_err(Error::into_wrong_format)
}

/// Decode `input` into a freshly allocated vector.
///
/// The allocation is sized from the count header alone, and a count the
/// allocator cannot satisfy fails with [`Error::WrongFormat`]. Callers decoding
/// untrusted input should still check [`decoded_size`] against their own limit.
pub fn decode_to_vec<W: Word>(input: &[u8], config: &Config) -> Result<Vec<W>> {
    let len = decoded_size::<W>(input, config)?;
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|e| Error::WrongFormat(format!("cannot hold {len} decoded values: {e}")))?;
    out.resize(len, W::default());
    decode(input, config, &mut out)?;
    Ok(out)
}

/// Number of values encoded in `input`, read from the count header only.
pub fn decoded_size<W: Word>(input: &[u8], config: &Config) -> Result<usize> {
    let width = config.effective_width::<W>()?;
    read_len(&mut BitReader::new(input), config.kind(), width)
}

fn read_len(reader: &mut BitReader<'_>, kind: Kind, width: u32) -> Result<usize> {
    let len = match kind {
        Kind::List => reader
            .read(LIST_LEN_BITS)
            .map_err(Error::into_wrong_format)?,
        Kind::Set => reader
            .read_wide(width)
            .map_err(Error::into_wrong_format)?
            .checked_add(1)
            .ok_or_else(|| Error::WrongFormat("set count overflows".to_string()))?,
    };

    usize::try_from(len)
        .map_err(|_| Error::WrongFormat(format!("encoded count {len} does not fit in memory")))
}

struct TreeDecoder<'i, 'o, W> {
    reader: BitReader<'i>,
    out: &'o mut [W],
}

impl<W: Word> ClusterVisitor for TreeDecoder<'_, '_, W> {
    type Word = W;

    #[inline]
    fn values(&self) -> &[W] {
        &*self.out
    }

    fn visit(&mut self, cluster: &BitCluster, step: Step) -> Result<()> {
        let higher = cluster.higher_bits;
        match step {
            Step::Leaf => {
                self.out[cluster.range()].fill(W::from_u64(higher));
            }
            Step::FullSubtree => {
                for (i, slot) in self.out[cluster.range()].iter_mut().enumerate() {
                    *slot = W::from_u64(higher | i as u64);
                }
            }
            Step::Literal => {
                for slot in &mut self.out[cluster.range()] {
                    let low = self.reader.read_wide(cluster.bit_pos)?;
                    *slot = W::from_u64(higher | low);
                }
            }
            Step::Split => {
                let n_zeros = self
                    .reader
                    .read_wide(bits_len_u64(cluster.length as u64))?;
                if n_zeros > cluster.length as u64 {
                    return Err(Error::WrongFormat(format!(
                        "zero count {n_zeros} exceeds cluster length {}",
                        cluster.length
                    )));
                }
                let (left, right) = cluster.split(n_zeros as usize);
                self.out[left.range()].fill(W::from_u64(left.higher_bits));
                self.out[right.range()].fill(W::from_u64(right.higher_bits));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_to_vec;

    const SET_BYTES: [u8; 6] = [0x0b, 0x88, 0x44, 0x20, 0x91, 0x04];
    const LIST_BYTES: [u8; 14] = [
        0x09, 0, 0, 0, 0, 0, 0, 0x6e, 0x00, 0x21, 0xc0, 0xe1, 0x10, 0x08,
    ];

    #[test]
    fn known_set_vector() {
        assert_eq!(decoded_size::<u8>(&SET_BYTES, &Config::set()), Ok(12));
        let values: Vec<u8> = decode_to_vec(&SET_BYTES, &Config::set()).unwrap();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5, 6, 7, 160, 161, 162, 163]);
    }

    #[test]
    fn known_list_vector() {
        assert_eq!(decoded_size::<u8>(&LIST_BYTES, &Config::list()), Ok(9));
        let values: Vec<u8> = decode_to_vec(&LIST_BYTES, &Config::list()).unwrap();
        assert_eq!(values, vec![57, 57, 57, 111, 111, 111, 111, 208, 208]);
    }

    #[test]
    fn empty_list() {
        let values: Vec<u32> = decode_to_vec(&[0u8; 8], &Config::list()).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn output_contents_do_not_matter() {
        let mut out = [0xaau8; 12];
        decode(&SET_BYTES, &Config::set(), &mut out).unwrap();
        assert_eq!(out, [0, 1, 2, 3, 4, 5, 6, 7, 160, 161, 162, 163]);

        let mut out = [0xffu8; 9];
        decode(&LIST_BYTES, &Config::list(), &mut out).unwrap();
        assert_eq!(out, [57, 57, 57, 111, 111, 111, 111, 208, 208]);
    }

    #[test]
    fn truncated_input() {
        for cut in 0..LIST_BYTES.len() {
            let result = decode_to_vec::<u8>(&LIST_BYTES[..cut], &Config::list());
            assert!(
                matches!(result, Err(Error::WrongFormat(_))),
                "cut at {cut}: {result:?}"
            );
        }
        for cut in 0..SET_BYTES.len() {
            let result = decode_to_vec::<u8>(&SET_BYTES[..cut], &Config::set());
            assert!(matches!(result, Err(Error::WrongFormat(_))), "cut at {cut}");
        }
    }

    #[test]
    fn zero_count_above_cluster_length() {
        let mut bytes = encode_to_vec(&[0u8, 0, 0, 200, 200], &Config::list()).unwrap();
        // Root count (3 bits after the 57-bit header) set to 7 > 5.
        bytes[7] |= 0b1110;
        let result = decode_to_vec::<u8>(&bytes, &Config::list());
        assert!(matches!(result, Err(Error::WrongFormat(_))));
    }

    #[test]
    fn output_length_mismatch() {
        let mut out = [0u8; 11];
        assert!(matches!(
            decode(&SET_BYTES, &Config::set(), &mut out),
            Err(Error::WrongFormat(_))
        ));
    }

    #[test]
    fn output_too_big() {
        let mut out = vec![0u8; 257];
        assert_eq!(
            decode(&SET_BYTES, &Config::set(), &mut out),
            Err(Error::OutputTooBig { len: 257, max: 256 })
        );
    }

    #[test]
    fn set_count_overflow() {
        let bytes = [0xffu8; 16];
        assert!(matches!(
            decoded_size::<u64>(&bytes, &Config::set()),
            Err(Error::WrongFormat(_))
        ));
    }

    #[test]
    fn corrupt_list_header_is_rejected() {
        // Bit 55 of the count: about 2^55 values, more than any allocator gives out.
        let mut bytes = encode_to_vec(&[1u8, 2, 3], &Config::list()).unwrap();
        bytes[6] ^= 0x80;
        assert!(matches!(
            decode_to_vec::<u8>(&bytes, &Config::list()),
            Err(Error::WrongFormat(_))
        ));

        let mut bytes = encode_to_vec(&[1u64, 2, 3], &Config::list()).unwrap();
        bytes[6] ^= 0x40;
        assert!(matches!(
            decode_to_vec::<u64>(&bytes, &Config::list()),
            Err(Error::WrongFormat(_))
        ));
    }

    #[test]
    fn full_set_from_header_only() {
        let values: Vec<u16> = decode_to_vec(&[0xff, 0x0f], &Config::set().with_bit_width(12))
            .unwrap();
        assert_eq!(values, (0..4096).collect::<Vec<u16>>());
    }
}
