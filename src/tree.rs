//! The bit-cluster tree and its level-by-level walk.
//!
//! # Intuition
//!
//! Take a sorted array and look at its most significant bit. Because the array
//! is sorted, every value with that bit clear comes before every value with it
//! set, so the whole split is described by a single number: how many values
//! have the bit clear. Recurse on both halves with the next bit and you get a
//! binary tree whose nodes (clusters) are runs of values sharing their higher
//! bits. Storing only the per-node zero counts is enough to rebuild the array.
//!
//! # Serialization order
//!
//! Clusters are serialized level by level: every cluster with `bit_pos == w`,
//! then every cluster with `bit_pos == w - 1`, and so on, left to right within
//! a level. A level is produced by one linear scan over the array: the parents
//! one level up are the maximal runs of values sharing their bits at and above
//! `bit_pos + 1`, and only a parent that splits has children on this level.
//!
//! The parent run alone decides this. A literal cluster only has descendants
//! no longer than itself, and a full subtree only has full descendants, so no
//! cluster below a terminal one ever classifies as a split. The walk keeps no
//! pending clusters at all: each level costs `O(n)` plus one binary search per
//! split, and nothing recurses or allocates.

use std::ops::Range;

use crate::bits::{is_full_subtree, BITS_POS_MASK, BITS_SIZE_MASK};
use crate::error::Result;
use crate::word::Word;
use crate::zeros::count_zeros_at_bit;

/// A run of the sorted array whose values share every bit above `bit_pos`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCluster {
    /// Offset of the first value.
    pub from: usize,
    /// Number of values.
    pub length: usize,
    /// Number of low bits still unresolved.
    pub bit_pos: u32,
    /// The shared prefix, with the unresolved low bits zero.
    pub higher_bits: u64,
}

impl BitCluster {
    /// The cluster spanning a whole `length`-value array of `width`-bit values.
    pub fn root(length: usize, width: u32) -> Self {
        Self {
            from: 0,
            length,
            bit_pos: width,
            higher_bits: 0,
        }
    }

    /// Split on bit `bit_pos - 1`, given how many values have it clear.
    ///
    /// Either child may be empty.
    #[inline]
    pub fn split(&self, n_zeros: usize) -> (BitCluster, BitCluster) {
        debug_assert!(self.bit_pos > 0);
        debug_assert!(n_zeros <= self.length);
        let bit_pos = self.bit_pos - 1;
        let left = BitCluster {
            from: self.from,
            length: n_zeros,
            bit_pos,
            higher_bits: self.higher_bits,
        };
        let right = BitCluster {
            from: self.from + n_zeros,
            length: self.length - n_zeros,
            bit_pos,
            higher_bits: self.higher_bits | BITS_POS_MASK[bit_pos as usize],
        };
        (left, right)
    }

    /// Index range of the cluster's values.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.from..self.from + self.length
    }
}

/// What a cluster contributes to the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// All bits resolved; the values equal `higher_bits`.
    Leaf,
    /// Every value of the `2^bit_pos` range is present; nothing is stored.
    FullSubtree,
    /// Low `bit_pos` bits of every value are stored as-is.
    Literal,
    /// The zero count at `bit_pos - 1` is stored and both halves follow.
    Split,
}

/// The parameters deciding how clusters are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeShape {
    full_subtrees: bool,
    min_cluster_length: usize,
}

impl TreeShape {
    /// Build a shape. `full_subtrees` must only be set for sequences without repeats.
    pub fn new(full_subtrees: bool, min_cluster_length: usize) -> Self {
        Self {
            full_subtrees,
            min_cluster_length,
        }
    }

    /// Classify `cluster`.
    #[inline]
    pub fn step(&self, cluster: &BitCluster) -> Step {
        if cluster.bit_pos == 0 {
            Step::Leaf
        } else if self.full_subtrees && is_full_subtree(cluster.length, cluster.bit_pos) {
            Step::FullSubtree
        } else if cluster.length <= self.min_cluster_length {
            Step::Literal
        } else {
            Step::Split
        }
    }
}

/// One side of the codec, driven by [`walk_levels`].
pub(crate) trait ClusterVisitor {
    /// Element type of the sequence.
    type Word: Word;

    /// The values as known so far. Bits at and above the level being walked
    /// must be final.
    fn values(&self) -> &[Self::Word];

    /// Write or read the stream data of `cluster`.
    fn visit(&mut self, cluster: &BitCluster, step: Step) -> Result<()>;
}

/// The maximal run starting at `from` whose values share every bit at and
/// above `bit_pos`.
fn run_at<W: Word>(values: &[W], from: usize, bit_pos: u32) -> BitCluster {
    let mask = !BITS_SIZE_MASK[bit_pos as usize];
    let higher_bits = values[from].to_u64() & mask;
    let length = values[from..]
        .iter()
        .take_while(|v| v.to_u64() & mask == higher_bits)
        .count();
    BitCluster {
        from,
        length,
        bit_pos,
        higher_bits,
    }
}

/// Visit every non-empty cluster of a `len`-value tree in serialization order,
/// stopping below `lowest_level`.
///
/// The first error aborts the walk.
pub(crate) fn walk_levels<V: ClusterVisitor>(
    visitor: &mut V,
    shape: TreeShape,
    len: usize,
    width: u32,
    lowest_level: u32,
) -> Result<()> {
    if len == 0 {
        return Ok(());
    }

    let root = BitCluster::root(len, width);
    let step = shape.step(&root);
    visitor.visit(&root, step)?;
    if step != Step::Split {
        return Ok(());
    }

    let mut level = width;
    while level > lowest_level {
        let mut has_next_level = false;
        let mut from = 0;
        while from < len {
            let (parent, n_zeros) = {
                let values = visitor.values();
                let parent = run_at(values, from, level);
                let n_zeros = if shape.step(&parent) == Step::Split {
                    Some(count_zeros_at_bit(&values[parent.range()], level - 1))
                } else {
                    None
                };
                (parent, n_zeros)
            };
            from = parent.from + parent.length;

            let Some(n_zeros) = n_zeros else {
                continue;
            };
            let (left, right) = parent.split(n_zeros);
            for child in [left, right] {
                if child.length == 0 {
                    continue;
                }
                let step = shape.step(&child);
                visitor.visit(&child, step)?;
                has_next_level |= step == Step::Split;
            }
        }

        if !has_next_level {
            break;
        }
        level -= 1;
    }
    Ok(())
}
