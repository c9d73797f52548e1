//! # Chunk Counter

use crate::{
    segmentation::TextSegmentor,
    training::{CountType, StringChunkType, utility::token_span_buffer::TokenSpanBuf},
    types::{TTHashMap, TokenType},
};

/// Counts the distinct text chunks of a corpus.
///
/// Chunks come from [`TextSegmentor::split`], the same split used to encode.
pub struct TextSpanCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// The pre-tokenizer.
    pub segmentor: TextSegmentor,

    /// The chunk counts.
    pub span_counts: TTHashMap<K, C>,
}

impl<K, C> TextSpanCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Create a new chunk counter.
    pub fn new(segmentor: TextSegmentor) -> Self {
        Self {
            segmentor,
            span_counts: TTHashMap::default(),
        }
    }

    /// Update chunk counts inplace from text.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        let span_counts = &mut self.span_counts;
        for piece in self.segmentor.split(text.as_ref()) {
            *span_counts.entry(K::from(piece)).or_default() += C::one();
        }
    }

    /// Update chunk counts inplace from a sample iterator.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            self.update_from_text(sample);
        }
    }

    /// Convert the chunk counter to a [`TokenSpanBuf<T>`] count iterator.
    pub fn to_text_span_counts_iter<T: TokenType>(
        &self
    ) -> impl Iterator<Item = (TokenSpanBuf<T>, C)> + '_ {
        self.span_counts
            .iter()
            .map(|(k, v)| (TokenSpanBuf::from_string(k), *v))
    }
}
