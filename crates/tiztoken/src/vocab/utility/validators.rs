//! Validators for various configuration options.
use crate::{
    errors::{TTResult, TiztokenError},
    types::TokenType,
};

/// The size of the u8 space.
pub const U8_SIZE: usize = u8::MAX as usize + 1;

/// Validates and returns a training vocabulary size.
///
/// The size must leave room for at least one merge above the byte range,
/// and the largest id must fit in `T`.
pub fn try_vocab_size<T: TokenType>(vocab_size: usize) -> TTResult<usize> {
    if vocab_size <= U8_SIZE {
        Err(TiztokenError::VocabSizeTooSmall { size: vocab_size })
    } else if T::from_usize(vocab_size - 1).is_none() {
        Err(TiztokenError::VocabSizeOverflow { size: vocab_size })
    } else {
        Ok(vocab_size)
    }
}

/// Convert a `u64` id into `T`.
pub fn try_token<T: TokenType>(id: u64) -> TTResult<T> {
    T::from_u64(id).ok_or(TiztokenError::TokenOutOfRange)
}
