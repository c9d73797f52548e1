//! # Vocabulary
//!
//! This module provides the vocabulary tables and related io mechanisms.
//!
//! ## Merge Table
//!
//! Learned and loaded merges live in a [`MergeTable`], which operates on
//! canonical byte tokens (``0..=255`` is the byte value) and derives the
//! byte expansion of every merged token.
//!
//! ## Byte Vocabulary
//!
//! Some public vocabularies number their single-byte tokens in an order
//! other than the byte value. The bijection is held by:
//! * [`ByteMapVocab`].
//!
//! ## Special Words
//!
//! Literal strings bound to reserved tokens live in a [`SpecialVocab`].
pub mod byte_vocab;
pub mod io;
pub mod merge_table;
pub mod special_vocab;
pub mod token_vocab;
pub mod utility;
pub mod vocab_types;

#[doc(inline)]
pub use byte_vocab::ByteMapVocab;
#[doc(inline)]
pub use merge_table::MergeTable;
#[doc(inline)]
pub use special_vocab::SpecialVocab;
#[doc(inline)]
pub use token_vocab::TokenVocab;
#[doc(inline)]
pub use vocab_types::{ByteTokenArray, PairTokenMap, SpanTokenMap, TokenByteMap, TokenSpanMap};
