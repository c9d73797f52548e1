//! # Training Types
//!
//! The trainer counts each distinct pre-tokenized chunk once, keyed by a
//! [`StringChunkType`], and weighs its pair statistics by a [`CountType`].
use core::{
    fmt::{Debug, Display},
    hash::Hash,
    ops::{AddAssign, SubAssign},
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive};

/// The key type for distinct text chunks, such as `String` or `CompactString`.
pub trait StringChunkType:
    for<'a> From<&'a str> + AsRef<str> + Debug + Clone + Send + Sync + Eq + Hash + Ord
{
}

impl<T> StringChunkType for T where
    T: for<'a> From<&'a str> + AsRef<str> + Debug + Clone + Send + Sync + Eq + Hash + Ord
{
}

/// The occurrence count type for chunks and pairs.
pub trait CountType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + AddAssign
    + SubAssign
{
    /// Shift a pair count by `weight` occurrences in the direction of `delta`.
    ///
    /// A merge inside a chunk seen `weight` times adds (`delta > 0`) or
    /// removes (`delta < 0`) that many pair occurrences. Counts never drop
    /// below zero.
    fn apply_pair_delta(
        &mut self,
        delta: i32,
        weight: Self,
    ) {
        *self = if delta < 0 {
            self.saturating_sub(weight)
        } else {
            self.saturating_add(weight)
        };
    }
}

impl<T> CountType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
        + AddAssign
        + SubAssign
{
}
