//! Codec settings.

use crate::error::{Error, Result};
use crate::tree::TreeShape;
use crate::word::Word;

/// The kind of sequence being encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Non-decreasing; repeated values allowed.
    List,
    /// Strictly increasing; no repeated values.
    Set,
}

/// Settings shared by an encode call and the matching decode call.
///
/// Both sides must use the same settings; nothing about them is stored in the
/// encoded bytes.
///
/// ```
/// use bitcluster::Config;
///
/// let config = Config::set().with_min_cluster_length(4);
/// assert!(!config.allow_repeated_values());
/// assert_eq!(config.min_cluster_length(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    allow_repeated_values: bool,
    skip_full_subtrees: bool,
    min_cluster_length: usize,
    bit_width: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_repeated_values: true,
            skip_full_subtrees: true,
            min_cluster_length: 1,
            bit_width: 0,
        }
    }
}

impl Config {
    /// Defaults for lists (same as [`Config::default`]).
    pub fn list() -> Self {
        Self::default()
    }

    /// Defaults for sets.
    pub fn set() -> Self {
        Self::default().with_allow_repeated_values(false)
    }

    /// List (`true`) or set (`false`) semantics.
    #[must_use]
    pub fn with_allow_repeated_values(mut self, allow: bool) -> Self {
        self.allow_repeated_values = allow;
        self
    }

    /// Store nothing for clusters that contain their whole value range.
    /// Only takes effect for sets.
    #[must_use]
    pub fn with_skip_full_subtrees(mut self, skip: bool) -> Self {
        self.skip_full_subtrees = skip;
        self
    }

    /// Clusters of at most this many values are stored literally instead of split.
    #[must_use]
    pub fn with_min_cluster_length(mut self, len: usize) -> Self {
        self.min_cluster_length = len;
        self
    }

    /// Limit values to the low `width` bits; 0 means the full element width.
    #[must_use]
    pub fn with_bit_width(mut self, width: u32) -> Self {
        self.bit_width = width;
        self
    }

    /// Whether repeated values are allowed.
    pub fn allow_repeated_values(&self) -> bool {
        self.allow_repeated_values
    }

    /// Whether full subtrees are skipped (when encoding sets).
    pub fn skip_full_subtrees(&self) -> bool {
        self.skip_full_subtrees
    }

    /// Literal-encoding threshold.
    pub fn min_cluster_length(&self) -> usize {
        self.min_cluster_length
    }

    /// Configured bit width, 0 meaning the element width.
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// The sequence kind these settings describe.
    pub fn kind(&self) -> Kind {
        if self.allow_repeated_values {
            Kind::List
        } else {
            Kind::Set
        }
    }

    /// Bit width of the tree for `W` elements.
    pub fn effective_width<W: Word>(&self) -> Result<u32> {
        match self.bit_width {
            0 => Ok(W::BITS),
            width if width <= W::BITS => Ok(width),
            width => Err(Error::InvalidBitWidth {
                width,
                bits: W::BITS,
            }),
        }
    }

    pub(crate) fn tree_shape(&self) -> TreeShape {
        TreeShape::new(
            !self.allow_repeated_values && self.skip_full_subtrees,
            self.min_cluster_length,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert!(c.allow_repeated_values());
        assert!(c.skip_full_subtrees());
        assert_eq!(c.min_cluster_length(), 1);
        assert_eq!(c.bit_width(), 0);
        assert_eq!(c.kind(), Kind::List);
        assert_eq!(Config::set().kind(), Kind::Set);
    }

    #[test]
    fn effective_width() {
        assert_eq!(Config::default().effective_width::<u16>(), Ok(16));
        assert_eq!(
            Config::default().with_bit_width(12).effective_width::<u16>(),
            Ok(12)
        );
        assert_eq!(
            Config::default().with_bit_width(9).effective_width::<u8>(),
            Err(Error::InvalidBitWidth { width: 9, bits: 8 })
        );
    }

    #[test]
    fn full_subtrees_only_apply_to_sets() {
        assert_eq!(Config::list().tree_shape(), TreeShape::new(false, 1));
        assert_eq!(Config::set().tree_shape(), TreeShape::new(true, 1));
        assert_eq!(
            Config::set().with_skip_full_subtrees(false).tree_shape(),
            TreeShape::new(false, 1)
        );
    }
}
