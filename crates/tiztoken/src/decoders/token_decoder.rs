//! # Token Decoder Trait

use crate::{errors::TTResult, types::TokenType, vocab::utility::strings::string_from_utf8_lossy};

/// Trait for token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decodes tokens, appending their bytes to a target buffer.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    /// * `buf` - The target byte buffer.
    ///
    /// ## Errors
    /// [`crate::TiztokenError::UnknownToken`] for a token outside every table.
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> TTResult<()>;

    /// Decodes tokens into bytes.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// A `Result<Vec<u8>>`.
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TTResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(tokens.len() * 4);
        self.try_decode_append(tokens, &mut buf)?;
        Ok(buf)
    }

    /// Decodes a batch of tokens.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    ///
    /// ## Returns
    /// A `Result<Vec<Vec<u8>>>`.
    fn try_decode_batch_to_bytes(
        &self,
        batch: &[Vec<T>],
    ) -> TTResult<Vec<Vec<u8>>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_bytes(tokens))
            .collect()
    }

    /// Decodes tokens into a string.
    ///
    /// UTF-8 lossy decoding is used to handle invalid UTF-8 sequences.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// A `Result<String>`.
    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> TTResult<String> {
        self.try_decode_to_bytes(tokens).map(string_from_utf8_lossy)
    }

    /// Decodes a batch of tokens.
    ///
    /// UTF-8 lossy decoding is used to handle invalid UTF-8 sequences.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    ///
    /// ## Returns
    /// A `Result<Vec<String>>`.
    fn try_decode_batch_to_strings(
        &self,
        batch: &[Vec<T>],
    ) -> TTResult<Vec<String>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_string(tokens))
            .collect()
    }
}
