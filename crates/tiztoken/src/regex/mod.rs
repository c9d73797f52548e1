//! # Regex Utilities
//!
//! The GPT-style split patterns require extended regex machinery provided by
//! the [`fancy_regex`] crate (look-ahead, possessive quantifiers); we'd prefer
//! the standard [`regex`] crate when a pattern permits it.
//!
//! * Labeling Patterns - [`RegexWrapperPattern`]
//!   * [`RegexWrapperPattern::Basic`] - a pattern which was written for [`regex`].
//!   * [`RegexWrapperPattern::Fancy`] - a pattern which was written for [`fancy_regex`].
//!   * [`RegexWrapperPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]
//!
//! The [`RegexWrapper`] type supports only one operation, ``find_iter()``,
//! which yields byte ranges.

pub mod exact_match_union;
pub mod regex_wrapper;

#[doc(inline)]
pub use exact_match_union::exact_match_union_regex_pattern;
#[doc(inline)]
pub use regex_wrapper::{
    ConstRegexWrapperPattern,
    ErrorWrapper,
    MatchesWrapper,
    RegexWrapper,
    RegexWrapperPattern,
};
