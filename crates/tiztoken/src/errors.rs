//! # Error Types

use crate::regex::ErrorWrapper;

/// Errors from tiztoken operations.
#[derive(Debug, thiserror::Error)]
pub enum TiztokenError {
    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Vocab size must leave room for at least one merge above the byte range.
    #[error("vocab size ({size}) must be > 256")]
    VocabSizeTooSmall {
        /// The vocab size that was too small.
        size: usize,
    },

    /// A special token registration conflicts with an existing entry.
    #[error("special token conflict: {0}")]
    SpecialConflict(String),

    /// A registered special token was found in text encoded with
    /// [`crate::segmentation::AllowedSpecial::NoneRaise`].
    #[error("disallowed special token found in text: {0:?}")]
    DisallowedSpecial(String),

    /// A model file is malformed or has the wrong version.
    #[error("model format error at line {line}: {message}")]
    Format {
        /// The 1-based line number; 0 when not line specific.
        line: usize,

        /// What was wrong.
        message: String,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// A token id is not known to any vocabulary table.
    #[error("unknown token: {0}")]
    UnknownToken(u64),

    /// Token value out of range for the target type.
    #[error("token out of range")]
    TokenOutOfRange,

    /// Regex compilation or matching error.
    #[error("regex error: {0}")]
    Regex(#[from] ErrorWrapper),

    /// Parse error (base64, integer, etc.)
    #[error("parse error: {0}")]
    Parse(String),

    /// The operation is not supported by this tokenizer.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TiztokenError {
    /// Build a [`TiztokenError::Format`].
    pub fn format<S: Into<String>>(
        line: usize,
        message: S,
    ) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }
}

/// Result type for tiztoken operations.
pub type TTResult<T> = core::result::Result<T, TiztokenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TiztokenError::VocabSizeTooSmall { size: 100 }.to_string(),
            "vocab size (100) must be > 256"
        );
        assert_eq!(
            TiztokenError::format(3, "bad merge").to_string(),
            "model format error at line 3: bad merge"
        );
        assert_eq!(
            TiztokenError::DisallowedSpecial("<|endoftext|>".to_string()).to_string(),
            "disallowed special token found in text: \"<|endoftext|>\""
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: TiztokenError = std::io::Error::other("boom").into();
        assert!(matches!(err, TiztokenError::Io(_)));
    }
}
