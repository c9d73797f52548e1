//! # Parallel Decoder

use crate::{decoders::TokenDecoder, errors::TTResult, types::TokenType};

/// Batch-Level Parallel Decoder Wrapper.
///
/// Enables ``rayon`` decoding of batches when available.
#[derive(Clone)]
pub struct ParallelRayonDecoder<T: TokenType, D: TokenDecoder<T>> {
    /// Wrapped decoder.
    pub inner: D,

    _marker: core::marker::PhantomData<fn() -> T>,
}

impl<T, D> ParallelRayonDecoder<T, D>
where
    T: TokenType,
    D: TokenDecoder<T>,
{
    /// Create a new parallel token decoder.
    ///
    /// ## Arguments
    /// * `inner` - The token decoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonDecoder` instance.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            _marker: core::marker::PhantomData,
        }
    }
}

impl<T, D> TokenDecoder<T> for ParallelRayonDecoder<T, D>
where
    T: TokenType,
    D: TokenDecoder<T>,
{
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> TTResult<()> {
        self.inner.try_decode_append(tokens, buf)
    }

    fn try_decode_batch_to_bytes(
        &self,
        batch: &[Vec<T>],
    ) -> TTResult<Vec<Vec<u8>>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|tokens| self.try_decode_to_bytes(tokens))
            .collect()
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[Vec<T>],
    ) -> TTResult<Vec<String>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|tokens| self.try_decode_to_string(tokens))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decoders::DictionaryDecoder,
        errors::TiztokenError,
        types::static_is_send_sync_check,
        vocab::{ByteMapVocab, MergeTable, SpecialVocab},
    };

    #[test]
    fn test_decoder() {
        type T = u16;

        let samples = vec![
            "hello world",
            "hello san francisco",
            "it's not the heat, it's the salt",
        ];

        let merges = MergeTable::<T>::try_from_rules([((104, 101), 256)]).unwrap();
        let decoder = ParallelRayonDecoder::new(DictionaryDecoder::from_vocabs(
            &merges,
            &ByteMapVocab::default(),
            &SpecialVocab::default(),
        ));
        static_is_send_sync_check(&decoder);

        let token_batch: Vec<Vec<T>> = samples
            .iter()
            .map(|s| s.bytes().map(T::from).collect())
            .collect();

        let string_batch = decoder.try_decode_batch_to_strings(&token_batch).unwrap();
        assert_eq!(string_batch, samples);

        let byte_batch = decoder.try_decode_batch_to_bytes(&token_batch).unwrap();
        assert_eq!(byte_batch[0], b"hello world".to_vec());

        assert_eq!(decoder.try_decode_to_string(&[256, 108]).unwrap(), "hel");

        let bad = vec![vec![104], vec![9999]];
        assert!(matches!(
            decoder.try_decode_batch_to_strings(&bad),
            Err(TiztokenError::UnknownToken(9999))
        ));
    }
}
