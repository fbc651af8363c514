//! Bit-cluster-tree encoder.
//!
//! Layout of an encoded sequence:
//! - count header: the element count in 57 bits for lists, `count - 1` in
//!   `width` bits for sets;
//! - the cluster tree in level order (see [`crate::tree`]): a zero count in
//!   `bits_len(length)` bits per split cluster, the low `bit_pos` bits of
//!   every value of a literal cluster, nothing for a full subtree.

use crate::bits::bits_len_u64;
use crate::bitstream::BitWriter;
use crate::config::{Config, Kind};
use crate::error::{Error, Result};
use crate::limits::{max_encoded_size, max_values, LIST_LEN_BITS};
use crate::tree::{walk_levels, BitCluster, ClusterVisitor, Step};
use crate::word::Word;
use crate::zeros::count_zeros_at_bit;

/// Encode sorted `values` into `out`, returning the number of bytes written.
///
/// `values` must be non-decreasing for lists and strictly increasing for sets,
/// and fit in the configured bit width. Unsorted input never causes an
/// out-of-bounds access but will not decode back to itself.
///
/// Sizing `out` with [`max_encoded_size`] guarantees enough room.
pub fn encode<W: Word>(values: &[W], config: &Config, out: &mut [u8]) -> Result<usize> {
    let width = config.effective_width::<W>()?;
    let kind = config.kind();
    check_input_len(kind, width, values.len())?;

    let mut writer = BitWriter::new(out)?;
    write_len(&mut writer, kind, width, values.len())?;

    let mut encoder = TreeEncoder { values, writer };
    walk_levels(&mut encoder, config.tree_shape(), values.len(), width, 1)?;
    encoder.writer.close()
}

/// Encode `values` into a freshly allocated buffer trimmed to the encoded size.
pub fn encode_to_vec<W: Word>(values: &[W], config: &Config) -> Result<Vec<u8>> {
    let width = config.effective_width::<W>()?;
    check_input_len(config.kind(), width, values.len())?;

    let mut out = vec![0u8; max_encoded_size::<W>(config.kind(), values.len())];
    let written = encode(values, config, &mut out)?;
    out.truncate(written);
    Ok(out)
}

fn check_input_len(kind: Kind, width: u32, len: usize) -> Result<()> {
    if kind == Kind::Set && len == 0 {
        return Err(Error::InputTooSmall(len));
    }
    let max = max_values(kind, width);
    if len as u64 > max {
        return Err(Error::InputTooBig { len, max });
    }
    Ok(())
}

fn write_len(writer: &mut BitWriter<'_>, kind: Kind, width: u32, len: usize) -> Result<()> {
    match kind {
        Kind::List => writer.write(len as u64, LIST_LEN_BITS),
        Kind::Set => writer.write_wide(len as u64 - 1, width),
    }
}

struct TreeEncoder<'v, 'o, W> {
    values: &'v [W],
    writer: BitWriter<'o>,
}

impl<W: Word> ClusterVisitor for TreeEncoder<'_, '_, W> {
    type Word = W;

    #[inline]
    fn values(&self) -> &[W] {
        self.values
    }

    fn visit(&mut self, cluster: &BitCluster, step: Step) -> Result<()> {
        match step {
            Step::Leaf | Step::FullSubtree => Ok(()),
            Step::Literal => {
                for &value in &self.values[cluster.range()] {
                    self.writer.write_wide(value.to_u64(), cluster.bit_pos)?;
                }
                Ok(())
            }
            Step::Split => {
                let n_zeros =
                    count_zeros_at_bit(&self.values[cluster.range()], cluster.bit_pos - 1);
                self.writer
                    .write_wide(n_zeros as u64, bits_len_u64(cluster.length as u64))
            }
        }
    }
}
