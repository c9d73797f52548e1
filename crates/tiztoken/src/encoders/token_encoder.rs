//! # Token Encoder Trait

use crate::{
    errors::{TTResult, TiztokenError},
    segmentation::{AllowedSpecial, SpanRef, TextSegmentor},
    types::TokenType,
    vocab::SpecialVocab,
};

/// Rough bytes per token for buffer sizing.
const EXPECTED_BYTES_PER_TOKEN: usize = 4;

/// A trait for token encoders.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Return the attached text segmentor.
    ///
    /// Its special word matcher covers every registered special word.
    fn segmentor(&self) -> &TextSegmentor;

    /// Return the attached special vocab.
    fn special_vocab(&self) -> &SpecialVocab<T>;

    /// Encode an ordinary chunk, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `span` - The byte span to encode.
    /// * `tokens` - The target token buffer to append to.
    fn encode_append_span_ordinary(
        &self,
        span: &[u8],
        tokens: &mut Vec<T>,
    );

    /// Encode a sequence of [`SpanRef`]s over `text`.
    ///
    /// A special span whose text is not a registered word is encoded as
    /// ordinary text.
    fn encode_append_spans<I>(
        &self,
        text: &str,
        spans: I,
        tokens: &mut Vec<T>,
    ) where
        I: IntoIterator<Item = SpanRef>,
    {
        for span_ref in spans {
            match span_ref {
                SpanRef::Special(range) => {
                    let word = &text[range];
                    match self.special_vocab().lookup_token(word) {
                        Some(token) => tokens.push(token),
                        None => self.encode_append_span_ordinary(word.as_bytes(), tokens),
                    }
                }
                SpanRef::Word(range) | SpanRef::Gap(range) => {
                    self.encode_append_span_ordinary(text[range].as_bytes(), tokens)
                }
            }
        }
    }

    /// Encode text, ignoring special words, appending to a target buffer.
    fn encode_ordinary_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) {
        for chunk in self.segmentor().split(text) {
            self.encode_append_span_ordinary(chunk.as_bytes(), tokens);
        }
    }

    /// Encode text under a special word policy, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `allowed` - Which special words to intercept.
    /// * `tokens` - The target token buffer to append to.
    ///
    /// ## Errors
    /// [`TiztokenError::DisallowedSpecial`] under [`AllowedSpecial::NoneRaise`]
    /// if any registered special word occurs in `text`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, tokens)))]
    fn try_encode_append(
        &self,
        text: &str,
        allowed: &AllowedSpecial,
        tokens: &mut Vec<T>,
    ) -> TTResult<()> {
        match allowed {
            AllowedSpecial::None => self.encode_ordinary_append(text, tokens),
            AllowedSpecial::NoneRaise => {
                if let Some(range) = self.segmentor().find_special(text) {
                    return Err(TiztokenError::DisallowedSpecial(text[range].to_string()));
                }
                self.encode_ordinary_append(text, tokens);
            }
            AllowedSpecial::All => {
                self.encode_append_spans(text, self.segmentor().spans(text), tokens)
            }
            AllowedSpecial::Set(_) => {
                let words = allowed.select(self.special_vocab());
                let special_re = TextSegmentor::compile_specials(&words)?;
                self.encode_append_spans(
                    text,
                    self.segmentor().spans_with(text, special_re.as_ref()),
                    tokens,
                );
            }
        }
        Ok(())
    }

    /// Encode text into tokens.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `allowed` - Which special words to intercept.
    ///
    /// ## Returns
    /// A `Result` containing the vector of tokens or an error.
    fn try_encode<S: AsRef<str>>(
        &self,
        text: S,
        allowed: &AllowedSpecial,
    ) -> TTResult<Vec<T>> {
        let text = text.as_ref();
        let mut tokens = Vec::with_capacity(text.len() / EXPECTED_BYTES_PER_TOKEN + 1);
        self.try_encode_append(text, allowed, &mut tokens)?;
        Ok(tokens)
    }

    /// Encode text into tokens, ignoring special words.
    fn encode_ordinary<S: AsRef<str>>(
        &self,
        text: S,
    ) -> Vec<T> {
        let text = text.as_ref();
        let mut tokens = Vec::with_capacity(text.len() / EXPECTED_BYTES_PER_TOKEN + 1);
        self.encode_ordinary_append(text, &mut tokens);
        tokens
    }

    /// Encode a batch of text into tokens.
    ///
    /// ## Arguments
    /// * `batch` - A slice of strings to encode.
    /// * `allowed` - Which special words to intercept.
    ///
    /// ## Returns
    /// A `Result` containing the vector of token vectors or an error.
    fn try_encode_batch<S: AsRef<str> + Sync>(
        &self,
        batch: &[S],
        allowed: &AllowedSpecial,
    ) -> TTResult<Vec<Vec<T>>> {
        batch.iter().map(|s| self.try_encode(s, allowed)).collect()
    }
}
