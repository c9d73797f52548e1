//! # Pretrained Vocabularies
//!
//! * [`patterns`] - the GPT-2 and GPT-4 word split patterns.
//! * [`specials`] - the ``cl100k_base`` special token literals.
//! * [`gpt4`] - [`Gpt4Tokenizer`], which replays ``cl100k_base``.

pub mod gpt4;
pub mod patterns;
pub mod specials;

#[doc(inline)]
pub use gpt4::{Gpt4Tokenizer, recover_merges};
