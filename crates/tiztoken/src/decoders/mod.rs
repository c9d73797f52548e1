//! # Token Decoders
//!
//! Decoder clients should use:
//!
//! * [`DictionaryDecoder`] - a `{ token -> bytes }` [`TokenDecoder`].
//! * `ParallelRayonDecoder` - a batch parallelism wrapper around any `TokenDecoder`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tiztoken::decoders::{DictionaryDecoder, TokenDecoder};
//! use tiztoken::types::TokenType;
//! use tiztoken::vocab::{ByteMapVocab, MergeTable, SpecialVocab};
//!
//! fn example<T: TokenType>(
//!     merges: &MergeTable<T>,
//!     batch: &[Vec<T>],
//! ) -> Vec<String> {
//!     let decoder: DictionaryDecoder<T> =
//!         DictionaryDecoder::from_vocabs(merges, &ByteMapVocab::default(), &SpecialVocab::default());
//!
//!     #[cfg(feature = "rayon")]
//!     let decoder = tiztoken::rayon::ParallelRayonDecoder::new(decoder);
//!
//!     decoder.try_decode_batch_to_strings(batch).unwrap()
//! }
//! ```

pub mod dictionary_decoder;
pub mod token_decoder;

#[doc(inline)]
pub use dictionary_decoder::DictionaryDecoder;
#[doc(inline)]
pub use token_decoder::TokenDecoder;
