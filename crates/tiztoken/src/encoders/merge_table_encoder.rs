//! # Merge Table Encoder

use crate::{
    encoders::{
        merge_scan_encoder::MergeScanSpanEncoder,
        span_encoder::SpanEncoder,
        token_encoder::TokenEncoder,
    },
    errors::TTResult,
    regex::RegexWrapper,
    segmentation::TextSegmentor,
    types::TokenType,
    vocab::{ByteMapVocab, MergeTable, SpecialVocab, utility::validators::U8_SIZE},
};

/// A [`TokenEncoder`] over a [`MergeTable`], with a pluggable [`SpanEncoder`].
///
/// Merges run over canonical byte tokens; single-byte results are then
/// renumbered through the [`ByteMapVocab`].
pub struct MergeTableEncoder<T, S = MergeScanSpanEncoder<T>>
where
    T: TokenType,
    S: SpanEncoder<T>,
{
    merges: MergeTable<T>,
    byte_vocab: ByteMapVocab<T>,
    byte_identity: bool,
    specials: SpecialVocab<T>,
    segmentor: TextSegmentor,

    marker: core::marker::PhantomData<fn() -> S>,
}

impl<T, S> Clone for MergeTableEncoder<T, S>
where
    T: TokenType,
    S: SpanEncoder<T>,
{
    fn clone(&self) -> Self {
        Self {
            merges: self.merges.clone(),
            byte_vocab: self.byte_vocab.clone(),
            byte_identity: self.byte_identity,
            specials: self.specials.clone(),
            segmentor: self.segmentor.clone(),
            marker: Default::default(),
        }
    }
}

impl<T: TokenType, S: SpanEncoder<T>> MergeTableEncoder<T, S> {
    /// Initialize an encoder.
    ///
    /// ## Arguments
    /// * `merges` - The merge rules.
    /// * `byte_vocab` - The external numbering of the single-byte tokens.
    /// * `specials` - The registered special words.
    /// * `word_re` - The word split regex, if any.
    ///
    /// ## Returns
    /// A new `MergeTableEncoder` instance.
    pub fn init(
        merges: MergeTable<T>,
        byte_vocab: ByteMapVocab<T>,
        specials: SpecialVocab<T>,
        word_re: Option<RegexWrapper>,
    ) -> TTResult<Self> {
        let segmentor = TextSegmentor::init(word_re, None);
        let mut encoder = Self {
            merges,
            byte_identity: byte_vocab.is_identity(),
            byte_vocab,
            specials: SpecialVocab::default(),
            segmentor,
            marker: Default::default(),
        };
        encoder.set_special_vocab(specials)?;
        Ok(encoder)
    }

    fn set_special_vocab(
        &mut self,
        specials: SpecialVocab<T>,
    ) -> TTResult<()> {
        let words = specials.iter().map(|(w, _)| w).collect::<Vec<_>>();
        self.segmentor = self.segmentor.clone().with_specials(&words)?;
        self.specials = specials;
        Ok(())
    }

    /// The merge rules.
    pub fn merges(&self) -> &MergeTable<T> {
        &self.merges
    }

    /// The single-byte token numbering.
    pub fn byte_vocab(&self) -> &ByteMapVocab<T> {
        &self.byte_vocab
    }
}

impl<T: TokenType, S: SpanEncoder<T>> TokenEncoder<T> for MergeTableEncoder<T, S> {
    fn segmentor(&self) -> &TextSegmentor {
        &self.segmentor
    }

    fn special_vocab(&self) -> &SpecialVocab<T> {
        &self.specials
    }

    fn encode_append_span_ordinary(
        &self,
        span: &[u8],
        tokens: &mut Vec<T>,
    ) {
        let start = tokens.len();
        S::default().encode_append_span(&self.merges, span, tokens);

        if !self.byte_identity {
            for token in &mut tokens[start..] {
                if let Some(b) = token.to_usize().filter(|&b| b < U8_SIZE) {
                    *token = self.byte_vocab.get_token(b as u8);
                }
            }
        }
    }
}
