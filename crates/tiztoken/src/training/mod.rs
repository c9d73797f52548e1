//! # Vocabulary Training
//!
//! Support for learning byte-level BPE merge tables.
//!
//! Training requires:
//! * a target vocabulary size, which must be larger than the 256 byte tokens;
//! * optionally, a split pattern; merges never cross the chunks it produces.
//!
//! Every chunk starts as its canonical byte tokens ``0..=255``. The trainer
//! repeatedly merges the most frequent adjacent pair into the next token id,
//! breaking count ties toward the smallest ``(left, right)`` pair.
//!
//! Training is single-threaded; distinct chunks are counted once and
//! weighted by their occurrence count.
//!
//! ```rust,no_run
//! use tiztoken::{
//!     pretrained::patterns::GPT4_SPLIT_PATTERN,
//!     training::{BinaryPairVocabTrainer, BinaryPairVocabTrainerOptions},
//!     vocab::MergeTable,
//! };
//!
//! fn example<I, S>(
//!     vocab_size: usize,
//!     samples: I,
//! ) -> tiztoken::TTResult<MergeTable<u32>>
//! where
//!     I: IntoIterator<Item = S>,
//!     S: AsRef<str>,
//! {
//!     let mut trainer: BinaryPairVocabTrainer = BinaryPairVocabTrainerOptions::new(vocab_size)
//!         .with_pattern(GPT4_SPLIT_PATTERN)
//!         .init()?;
//!
//!     trainer.update_from_samples(samples);
//!
//!     trainer.train()
//! }
//! ```

pub mod utility;

mod bpe_trainer;
mod training_types;

#[doc(inline)]
pub use bpe_trainer::{BinaryPairVocabTrainer, BinaryPairVocabTrainerOptions, MergeJob};
#[doc(inline)]
pub use training_types::{CountType, StringChunkType};
