//! # Text Segmentation
//!
//! This module exists to factor out text segmentation scanning.
//!
//! [`TextSegmentor`] is the pre-tokenizer: it splits text into chunks along
//! the categories of a word pattern, and intercepts special words.
//! Training and encoding share the same split, so merges never cross chunks.
//!
//! [`AllowedSpecial`] selects which special words are intercepted.

pub mod allowed_special;
pub mod text_segmentor;

#[doc(inline)]
pub use allowed_special::AllowedSpecial;
#[doc(inline)]
pub use text_segmentor::{Segments, SpanRef, TextSegmentor};
