//! # `PairIndex` Builder

use crate::{
    training::{CountType, utility::token_span_buffer::TokenSpanBuf},
    types::{Pair, TTHashMap, TTHashSet, TokenType},
};

/// A map from [`Pair`] to its occurrence count.
pub type PairCountMap<T, C> = TTHashMap<Pair<T>, C>;

/// A map from [`Pair`] to indices over ``words``.
pub type PairIndexMap<T> = TTHashMap<Pair<T>, TTHashSet<usize>>;

/// An index of ``(T, T)`` pair information relative to a ``&[TokenSpanBuf<T>]``.
#[derive(Debug, Clone)]
pub struct PairSpanIndex<T: TokenType, C: CountType> {
    /// A map from [`Pair`] to its occurrence count.
    ///
    /// ``sum(words[i].windows_count(pair) * word_counts[i]) for all i``
    pub pair_counts: PairCountMap<T, C>,

    /// A map from [`Pair`] to span indices.
    pub pair_index: PairIndexMap<T>,
}

impl<T: TokenType, C: CountType> PairSpanIndex<T, C> {
    /// Build a [`PairSpanIndex`] from a slice of [`TokenSpanBuf`]s, using a count table.
    ///
    /// # Arguments
    /// * `spans` - a sequence of text spans; assumed to be unique.
    /// * `counts` - `counts[i]` is the count of `spans[i]`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(spans, counts)))]
    pub fn from_span_count_table(
        spans: &[TokenSpanBuf<T>],
        counts: &[C],
    ) -> Self {
        let size_hint = spans.len() / 1000;

        let mut pair_index = PairSpanIndex {
            pair_counts: PairCountMap::with_capacity(size_hint),
            pair_index: PairIndexMap::with_capacity(size_hint),
        };

        let zero = C::zero();

        for (index, (span, &count)) in spans.iter().zip(counts).enumerate() {
            if count != zero && span.len() >= 2 {
                for p in span.pairs() {
                    *pair_index.pair_counts.entry(p).or_default() += count;
                    pair_index.pair_index.entry(p).or_default().insert(index);
                }
            }
        }

        pair_index
    }
}
