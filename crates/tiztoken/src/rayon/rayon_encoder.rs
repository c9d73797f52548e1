//! # Parallel Encoder

use crate::{
    encoders::TokenEncoder,
    errors::TTResult,
    segmentation::{AllowedSpecial, TextSegmentor},
    types::TokenType,
    vocab::SpecialVocab,
};

/// Batch-Level Parallel Encoder Wrapper.
///
/// Enables ``rayon`` encoding of batches when available.
#[derive(Clone)]
pub struct ParallelRayonEncoder<T: TokenType, E: TokenEncoder<T>> {
    /// Inner encoder.
    pub inner: E,

    _marker: core::marker::PhantomData<fn() -> T>,
}

impl<T, E> ParallelRayonEncoder<T, E>
where
    T: TokenType,
    E: TokenEncoder<T>,
{
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The token encoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonEncoder` instance.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            _marker: core::marker::PhantomData,
        }
    }
}

impl<T, E> TokenEncoder<T> for ParallelRayonEncoder<T, E>
where
    T: TokenType,
    E: TokenEncoder<T>,
{
    fn segmentor(&self) -> &TextSegmentor {
        self.inner.segmentor()
    }

    fn special_vocab(&self) -> &SpecialVocab<T> {
        self.inner.special_vocab()
    }

    fn encode_append_span_ordinary(
        &self,
        span: &[u8],
        tokens: &mut Vec<T>,
    ) {
        self.inner.encode_append_span_ordinary(span, tokens)
    }

    fn try_encode_batch<S: AsRef<str> + Sync>(
        &self,
        batch: &[S],
        allowed: &AllowedSpecial,
    ) -> TTResult<Vec<Vec<T>>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|text| self.try_encode(text, allowed))
            .collect()
    }
}
