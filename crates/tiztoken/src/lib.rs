//! # `tiztoken` Byte-Level BPE Tokenizer
//!
//! `tiztoken` learns byte-level Byte Pair Encoding vocabularies from text,
//! and converts between text and token ids with them.
//!
//! It is compatible with `minbpe`-style model files, and can replay the
//! `cl100k_base` vocabulary to reproduce `tiktoken` outputs exactly.
//!
//! See:
//! * [`tokenizer`] for the [`Tokenizer`] interface and the trainable [`BpeTokenizer`].
//! * [`pretrained`] for the [`Gpt4Tokenizer`] reference adapter and split patterns.
//! * [`training`] for the merge learner.
//! * [`encoders`] / [`decoders`] for the engine pieces.
//! * [`vocab`] for merge tables, special tokens, and model file io.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``.
//!
//! #### feature: ``rayon``
//!
//! This enables batch parallelism wrappers using the ``rayon`` crate.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//!
//! ## Training and Encoding
//!
//! ```rust,no_run
//! use tiztoken::{AllowedSpecial, BpeTokenizer, Tokenizer};
//!
//! let mut tok: BpeTokenizer<u32> = BpeTokenizer::gpt4()?;
//! tok.train("hello hello world", 260)?;
//!
//! let ids = tok.try_encode("hello world", &AllowedSpecial::None)?;
//! assert_eq!(tok.decode(&ids)?, "hello world");
//!
//! tok.save("/tmp/hello")?;
//! # Ok::<(), tiztoken::TiztokenError>(())
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "rayon")]
pub mod rayon;

pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod pretrained;
pub mod regex;
pub mod segmentation;
pub mod tokenizer;
pub mod training;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{TTResult, TiztokenError};
#[doc(inline)]
pub use pretrained::Gpt4Tokenizer;
#[doc(inline)]
pub use segmentation::AllowedSpecial;
#[doc(inline)]
pub use tokenizer::{BpeTokenizer, SpanningStrategy, Tokenizer};
