//! # Vocabulary Utilities

pub mod strings;
pub mod validators;
