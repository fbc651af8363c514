//! # Bit-Cluster Trees
//!
//! *Sub-byte-per-value encoding for sorted integer sequences.*
//!
//! ## Intuition First
//!
//! Picture a sorted column of numbers written in binary, one per row. Read the
//! top bit down the column: it is all zeros, then all ones. You don't need to
//! store that column of bits, only where the ones start. Inside each half, the
//! next bit behaves the same way, and so on down to the last bit.
//!
//! A sorted sequence is fully described by these split points. Dense regions
//! share long prefixes and collapse into a handful of small counts.
//!
//! ## The Problem
//!
//! Indexes, posting lists and timestamp columns store large sorted arrays of
//! IDs or offsets:
//! - **Raw arrays** spend the full word width on every value.
//! - **General-purpose compressors** ignore sortedness and need entropy models.
//!
//! ## Formulation
//!
//! Sequences come in two kinds:
//! - **List**: non-decreasing, repeats allowed, at most $2^{57} - 1$ values.
//! - **Set**: strictly increasing, between 1 and $2^w$ values.
//!
//! A cluster is a run of $L$ values sharing every bit above position $p$.
//! Splitting it on bit $p - 1$ stores the zero count in
//! $\lceil \log_2 (L + 1) \rceil$ bits. Clusters of at most `min_cluster_length`
//! values store their low $p$ bits as-is. For sets, a cluster with
//! $L = 2^p$ holds its whole range and costs nothing.
//!
//! ## Complexity Analysis
//!
//! - **Space**: at most $n \cdot w$ bits of tree plus a count header
//!   ([`max_encoded_size`]).
//! - **Time**: the tree is walked one level at a time, each level a single
//!   scan of the array plus a binary search per split: $O(w \cdot n)$.
//! - **Memory**: no heap allocation and no recursion in [`encode`] or
//!   [`decode`]. The walk keeps a constant amount of state.
//!
//! ## What Could Go Wrong
//!
//! 1. **Unsorted input** is not detected. It encodes without panicking but
//!    won't decode back to itself.
//! 2. **Mismatched settings**: nothing about the [`Config`] is stored, so
//!    decoding with different settings yields garbage or
//!    [`Error::WrongFormat`].
//!
//! ## Example
//!
//! ```
//! use bitcluster::{decode_to_vec, encode_to_vec, Config};
//!
//! let ids: Vec<u32> = vec![3, 4, 5, 6, 7, 1000, 1001, 90_000];
//! let bytes = encode_to_vec(&ids, &Config::set()).unwrap();
//! assert!(bytes.len() < ids.len() * 4);
//!
//! let back: Vec<u32> = decode_to_vec(&bytes, &Config::set()).unwrap();
//! assert_eq!(back, ids);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod bitstream;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod limits;
pub mod tree;
pub mod word;
pub mod zeros;

pub use config::{Config, Kind};
pub use decode::{decode, decode_to_vec, decoded_size};
pub use encode::{encode, encode_to_vec};
pub use error::{Error, Result};
pub use limits::{max_encoded_size, max_values, LIST_MAX_VALUES};
pub use word::Word;
