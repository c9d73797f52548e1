//! # Span Encoder Trait

use crate::{types::TokenType, vocab::MergeTable};

/// Encodes a single pre-tokenized chunk with a [`MergeTable`].
///
/// Implementations are constructed fresh (via `Default`) for each encode
/// call, and may hold scratch state between spans of that call.
pub trait SpanEncoder<T: TokenType>: Default {
    /// Encodes a single chunk to (multiple?) tokens.
    ///
    /// Appended tokens are canonical: raw bytes are ``0..=255``.
    ///
    /// ## Arguments
    /// * `merges` - The merge rules to apply.
    /// * `span` - The byte span to encode.
    /// * `tokens` - The target token buffer to append to.
    fn encode_append_span(
        &mut self,
        merges: &MergeTable<T>,
        span: &[u8],
        tokens: &mut Vec<T>,
    );
}
