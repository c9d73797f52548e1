//! # Token Encoders
//!
//! [`TokenEncoder`] turns text into tokens: it segments the text, intercepts
//! the allowed special words, and hands each ordinary chunk to a
//! [`SpanEncoder`].
//!
//! [`MergeTableEncoder`] is the [`TokenEncoder`] over a [`crate::vocab::MergeTable`];
//! [`MergeScanSpanEncoder`] is its default chunk encoder.

pub mod merge_scan_encoder;
pub mod merge_table_encoder;
pub mod span_encoder;
pub mod token_encoder;

#[doc(inline)]
pub use merge_scan_encoder::MergeScanSpanEncoder;
#[doc(inline)]
pub use merge_table_encoder::MergeTableEncoder;
#[doc(inline)]
pub use span_encoder::SpanEncoder;
#[doc(inline)]
pub use token_encoder::TokenEncoder;
