//! # Byte/Token Mapping Table

use core::fmt::Debug;

use crate::{
    errors::{TTResult, TiztokenError},
    types::{TokenType, byte_token},
    vocab::{ByteTokenArray, SpanTokenMap, TokenByteMap, TokenVocab},
};

/// ``0..=255`` Rank Byte/Token Bijection Table
///
/// This will always have 256 entries, one for each byte value.
/// The token values are not required to be in the range ``0..=255``,
/// but must be distinct.
#[derive(Clone, PartialEq)]
pub struct ByteMapVocab<T: TokenType> {
    /// Hash map from token to byte ordinal value.
    token_bytes: TokenByteMap<T>,

    /// Table mapping from byte ordinal (position) to token.
    byte_tokens: ByteTokenArray<T>,
}

impl<T: TokenType> Debug for ByteMapVocab<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ByteMapVocab")
            .field("is_identity", &self.is_identity())
            .field("max_token", &self.max_token())
            .finish()
    }
}

impl<T: TokenType> Default for ByteMapVocab<T> {
    fn default() -> Self {
        let byte_tokens: ByteTokenArray<T> = core::array::from_fn(|b| byte_token(b as u8));
        let token_bytes = byte_tokens
            .iter()
            .enumerate()
            .map(|(b, &t)| (t, b as u8))
            .collect();
        Self {
            token_bytes,
            byte_tokens,
        }
    }
}

impl<T: TokenType> ByteMapVocab<T> {
    /// Build a `ByteMapVocab` from a byte-ord => token table.
    ///
    /// ## Arguments
    /// * `byte_to_token` - A slice of tokens where the index corresponds to the byte value.
    ///
    /// ## Returns
    /// A new `ByteMapVocab`, or an error if the table is not a bijection.
    pub fn try_from_byte_to_token(byte_to_token: &[T]) -> TTResult<Self> {
        let byte_tokens: ByteTokenArray<T> = byte_to_token.try_into().map_err(|_| {
            TiztokenError::VocabConflict(format!(
                "byte table has {} entries, expected 256",
                byte_to_token.len()
            ))
        })?;

        let token_bytes: TokenByteMap<T> = byte_tokens
            .iter()
            .enumerate()
            .map(|(b, &token)| (token, b as u8))
            .collect();

        if token_bytes.len() != 256 {
            return Err(TiztokenError::VocabConflict(
                "byte table tokens are not distinct".to_string(),
            ));
        }

        Ok(Self {
            token_bytes,
            byte_tokens,
        })
    }

    /// Extract the single-byte entries of a span vocabulary.
    ///
    /// ## Arguments
    /// * `span_map` - A ``bytes => token`` map which must cover every byte.
    ///
    /// ## Returns
    /// A new `ByteMapVocab`, or an error if a byte is missing.
    pub fn try_from_span_map(span_map: &SpanTokenMap<T>) -> TTResult<Self> {
        let byte_tokens = (0..=255u8)
            .map(|b| {
                span_map.get([b].as_slice()).copied().ok_or_else(|| {
                    TiztokenError::VocabConflict(format!("vocab has no token for byte {b:#04x}"))
                })
            })
            .collect::<TTResult<Vec<T>>>()?;
        Self::try_from_byte_to_token(&byte_tokens)
    }

    /// Is this the identity mapping ``byte == token``?
    pub fn is_identity(&self) -> bool {
        self.byte_tokens
            .iter()
            .enumerate()
            .all(|(b, t)| t.to_usize() == Some(b))
    }

    /// Get the byte-ord => token mapping table.
    pub fn byte_tokens(&self) -> &ByteTokenArray<T> {
        &self.byte_tokens
    }

    /// Get the token->byte hash map.
    pub fn token_bytes(&self) -> &TokenByteMap<T> {
        &self.token_bytes
    }

    /// Get the token corresponding to a given byte.
    #[inline(always)]
    pub fn get_token(
        &self,
        byte: u8,
    ) -> T {
        self.byte_tokens[byte as usize]
    }

    /// Get the byte corresponding to a given token, if any.
    #[inline(always)]
    pub fn get_byte(
        &self,
        token: T,
    ) -> Option<u8> {
        self.token_bytes.get(&token).copied()
    }
}

impl<T: TokenType> TokenVocab<T> for ByteMapVocab<T> {
    fn tokens(&self) -> Vec<T> {
        let mut tokens = self.byte_tokens.to_vec();
        tokens.sort();
        tokens
    }

    fn len(&self) -> usize {
        256
    }

    fn span_pairs(&self) -> impl Iterator<Item = (Vec<u8>, T)> {
        let mut pairs = self
            .byte_tokens
            .iter()
            .enumerate()
            .map(|(idx, &token)| (vec![idx as u8], token))
            .collect::<Vec<_>>();
        pairs.sort_by_key(|(_, t)| *t);
        pairs.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_vocab_default() {
        type T = u32;
        let table: ByteMapVocab<T> = ByteMapVocab::default();

        assert_eq!(table.len(), 256);
        assert!(table.is_identity());
        assert_eq!(table.max_token(), Some(255));

        for idx in 0..256 {
            let byte = idx as u8;
            let token = idx as u32;

            assert_eq!(table.get_token(byte), token);
            assert_eq!(table.byte_tokens()[idx], token);
            assert_eq!(table.get_byte(token), Some(byte));
            assert_eq!(table.token_bytes()[&token], byte);
        }

        let rebuild = ByteMapVocab::try_from_byte_to_token(table.byte_tokens()).unwrap();
        assert_eq!(rebuild, table);
    }

    #[test]
    fn test_byte_vocab_permutation() {
        type T = u32;

        let reversed = (0..256u32).rev().collect::<Vec<_>>();
        let vocab = ByteMapVocab::<T>::try_from_byte_to_token(&reversed).unwrap();
        assert!(!vocab.is_identity());

        assert_eq!(vocab.get_token(0_u8), 255);
        assert_eq!(vocab.get_token(255_u8), 0);
        assert_eq!(vocab.get_byte(255), Some(0));
        assert_eq!(vocab.get_byte(256), None);

        let pairs = vocab.span_pairs().take(2).collect::<Vec<_>>();
        assert_eq!(pairs, vec![(vec![255], 0), (vec![254], 1)]);
    }

    #[test]
    fn test_byte_vocab_rejects_non_bijection() {
        let mut tokens = (0..256u32).collect::<Vec<_>>();
        tokens[7] = 6;
        assert!(ByteMapVocab::<u32>::try_from_byte_to_token(&tokens).is_err());
        assert!(ByteMapVocab::<u32>::try_from_byte_to_token(&tokens[..10]).is_err());
    }

    #[test]
    fn test_from_span_map() {
        let mut span_map: SpanTokenMap<u32> = Default::default();
        for b in 0..=255u8 {
            span_map.insert(vec![b], 1000 + b as u32);
        }
        span_map.insert(b"ab".to_vec(), 5000);

        let vocab = ByteMapVocab::try_from_span_map(&span_map).unwrap();
        assert_eq!(vocab.get_token(b'a'), 1000 + b'a' as u32);

        span_map.remove([3u8].as_slice());
        assert!(ByteMapVocab::try_from_span_map(&span_map).is_err());
    }
}
