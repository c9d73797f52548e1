//! # Merge Scan Span Encoder
//!
//! Re-scans the chunk for the lowest ranked merge,
//! applies it everywhere, and iterates until no merges remain.

use crate::{
    encoders::span_encoder::SpanEncoder,
    types::{TokenType, byte_token},
    vocab::MergeTable,
};

/// A [`SpanEncoder`] which repeatedly scans for the best merge.
///
/// Each round finds the adjacent pair with the lowest merge rank, then
/// replaces every non-overlapping occurrence of it, left to right,
/// compacting the working buffer in place.
#[derive(Default)]
pub struct MergeScanSpanEncoder<T: TokenType> {
    marker: core::marker::PhantomData<T>,
}

impl<T: TokenType> SpanEncoder<T> for MergeScanSpanEncoder<T> {
    fn encode_append_span(
        &mut self,
        merges: &MergeTable<T>,
        span: &[u8],
        tokens: &mut Vec<T>,
    ) {
        // Reuse the output buffer as our working memory.
        let start = tokens.len();
        tokens.extend(span.iter().map(|&b| byte_token::<T>(b)));

        while tokens.len() >= start + 2 {
            // Find the lowest ranked merge available.
            let Some((token, pair)) = tokens[start..]
                .windows(2)
                .filter_map(|w| {
                    let pair = (w[0], w[1]);
                    merges.lookup_pair(&pair).map(|token| (token, pair))
                })
                .min()
            else {
                break;
            };

            let end = tokens.len();
            let mut read = start;
            let mut write = start;
            while read < end {
                if read + 1 < end && (tokens[read], tokens[read + 1]) == pair {
                    tokens[write] = token;
                    read += 2;
                } else {
                    tokens[write] = tokens[read];
                    read += 1;
                }
                write += 1;
            }
            tokens.truncate(write);
        }
    }
}
