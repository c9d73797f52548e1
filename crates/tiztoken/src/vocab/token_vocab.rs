//! # Token Id Tables
//!
//! A tokenizer draws its ids from three tables: the 256 byte tokens
//! ([`crate::vocab::ByteMapVocab`]), the merge results
//! ([`crate::vocab::MergeTable`]), and the special words
//! ([`crate::vocab::SpecialVocab`]). The decoder and the ``.vocab`` listing
//! read each of them through [`TokenVocab`].

use crate::types::TokenType;

/// One table of token ids, and the bytes each id stands for.
pub trait TokenVocab<T: TokenType>: Clone + Send + Sync {
    /// The ids of this table, ascending.
    fn tokens(&self) -> Vec<T>;

    /// The number of ids in this table.
    fn len(&self) -> usize {
        self.tokens().len()
    }

    /// Does the table hold no ids?
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The largest id in the table; fresh ids are allocated above it.
    fn max_token(&self) -> Option<T> {
        self.tokens().last().copied()
    }

    /// Every ``(bytes, id)`` entry, ascending by id.
    ///
    /// Byte tables yield one byte per id, merge tables the full byte
    /// expansion, and special tables the UTF-8 literal.
    fn span_pairs(&self) -> impl Iterator<Item = (Vec<u8>, T)>;
}
