//! # Dictionary ``{ T -> Vec<u8> }`` Token Decoder

use crate::{
    decoders::token_decoder::TokenDecoder,
    errors::{TTResult, TiztokenError},
    types::TokenType,
    vocab::{ByteMapVocab, MergeTable, SpecialVocab, TokenSpanMap, TokenVocab},
};

/// A token dictionary [`TokenDecoder<T>`].
#[derive(Debug, Clone, Default)]
pub struct DictionaryDecoder<T: TokenType> {
    /// Token to bytes mapping.
    ///
    /// Includes the byte-tokens, in their external numbering.
    pub token_to_word: TokenSpanMap<T>,
}

impl<T: TokenType> DictionaryDecoder<T> {
    /// Creates a new Decoder.
    ///
    /// ## Arguments
    /// * `token_to_word` - The token to word mapping.
    ///
    /// ## Returns
    /// A new `DictionaryDecoder` instance.
    pub fn init(token_to_word: TokenSpanMap<T>) -> Self {
        Self { token_to_word }
    }

    /// Build a [`DictionaryDecoder`] from the vocabulary tables.
    ///
    /// ## Arguments
    /// * `merges` - The merge rules; their results expand to byte spans.
    /// * `byte_vocab` - The external numbering of the single-byte tokens.
    /// * `specials` - The special words; they expand to their UTF-8 bytes.
    ///
    /// ## Returns
    /// A new `DictionaryDecoder` instance.
    pub fn from_vocabs(
        merges: &MergeTable<T>,
        byte_vocab: &ByteMapVocab<T>,
        specials: &SpecialVocab<T>,
    ) -> Self {
        let mut token_to_word: TokenSpanMap<T> =
            TokenSpanMap::with_capacity(256 + merges.num_merges() + specials.len());

        token_to_word.extend(byte_vocab.span_pairs().map(|(span, t)| (t, span)));
        token_to_word.extend(merges.rules().iter().filter_map(|&(_, t)| {
            merges.expand(t).map(|span| (t, span.to_vec()))
        }));
        // special words never shadow merge results.
        for (word, t) in specials.iter() {
            token_to_word
                .entry(t)
                .or_insert_with(|| word.as_bytes().to_vec());
        }

        Self::init(token_to_word)
    }

    /// Look up the bytes of a token.
    pub fn lookup_word(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.token_to_word.get(&token).map(|w| w.as_slice())
    }
}

impl<T: TokenType> TokenDecoder<T> for DictionaryDecoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens, buf)))]
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> TTResult<()> {
        for &t in tokens {
            match self.token_to_word.get(&t) {
                Some(w) => buf.extend_from_slice(w),
                None => {
                    return Err(TiztokenError::UnknownToken(t.to_u64().unwrap_or(u64::MAX)));
                }
            }
        }
        Ok(())
    }
}
