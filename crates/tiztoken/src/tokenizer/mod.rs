//! # Tokenizers
//!
//! [`Tokenizer`] is the one interface over every tokenizer variant:
//! training, encoding, decoding, special word registration, and model files.
//!
//! * [`BpeTokenizer`] - the trainable byte-level BPE tokenizer; its
//!   [`SpanningStrategy`] picks plain or pattern-split pre-tokenization.
//! * [`crate::pretrained::Gpt4Tokenizer`] - the ``cl100k_base`` replay adapter,
//!   built on a [`BpeTokenizer`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use tiztoken::{AllowedSpecial, BpeTokenizer, Tokenizer};
//!
//! let mut tok: BpeTokenizer<u32> = BpeTokenizer::basic()?;
//! tok.train("aaabdaaabac", 259)?;
//! assert_eq!(
//!     tok.try_encode("aaabdaaabac", &AllowedSpecial::None)?,
//!     vec![258, 100, 258, 97, 99]
//! );
//! # Ok::<(), tiztoken::TiztokenError>(())
//! ```

pub mod bpe_tokenizer;
pub mod spanning;

use std::path::{Path, PathBuf};

#[doc(inline)]
pub use bpe_tokenizer::BpeTokenizer;
#[doc(inline)]
pub use spanning::SpanningStrategy;

use crate::{
    errors::TTResult,
    segmentation::AllowedSpecial,
    types::TokenType,
    vocab::{SpecialVocab, utility::strings::string_from_utf8_lossy},
};

/// The common tokenizer interface.
pub trait Tokenizer<T: TokenType>: Send + Sync {
    /// Learn merges from `text`, replacing any existing merges.
    ///
    /// ## Arguments
    /// * `text` - The training corpus.
    /// * `vocab_size` - The target vocabulary size; must be > 256.
    fn train(
        &mut self,
        text: &str,
        vocab_size: usize,
    ) -> TTResult<()>;

    /// Encode text, intercepting the allowed special words.
    fn try_encode(
        &self,
        text: &str,
        allowed: &AllowedSpecial,
    ) -> TTResult<Vec<T>>;

    /// Encode text, treating special words as ordinary text.
    fn encode_ordinary(
        &self,
        text: &str,
    ) -> Vec<T>;

    /// Decode tokens to their exact bytes.
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TTResult<Vec<u8>>;

    /// Decode tokens to text; invalid UTF-8 becomes U+FFFD.
    fn decode(
        &self,
        tokens: &[T],
    ) -> TTResult<String> {
        self.try_decode_to_bytes(tokens).map(string_from_utf8_lossy)
    }

    /// Register special words.
    ///
    /// Either every entry is registered, or none is.
    fn register_special_tokens(
        &mut self,
        specials: &[(&str, T)],
    ) -> TTResult<()>;

    /// The registered special words.
    fn special_tokens(&self) -> &SpecialVocab<T>;

    /// Save ``{prefix}.model`` and ``{prefix}.vocab``.
    ///
    /// ## Returns
    /// The path of the model file.
    fn save<P: AsRef<Path>>(
        &self,
        prefix: P,
    ) -> TTResult<PathBuf>;

    /// Replace this tokenizer's state with a saved ``.model`` file.
    fn load<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> TTResult<()>;

    /// Encode a batch of texts.
    fn try_encode_batch(
        &self,
        batch: &[&str],
        allowed: &AllowedSpecial,
    ) -> TTResult<Vec<Vec<T>>> {
        batch.iter().map(|text| self.try_encode(text, allowed)).collect()
    }

    /// Decode a batch of token sequences to text.
    fn try_decode_batch_to_strings(
        &self,
        batch: &[Vec<T>],
    ) -> TTResult<Vec<String>> {
        batch.iter().map(|tokens| self.decode(tokens)).collect()
    }
}
