//! # Special Words Vocabulary

use crate::{
    errors::{TTResult, TiztokenError},
    regex::{RegexWrapperPattern, exact_match_union_regex_pattern},
    types::{TTHashMap, TokenType},
    vocab::TokenVocab,
};

/// Token vocabulary for special words.
///
/// This contains no byte:token mappings, or pair mergers.
/// Literals and tokens are unique in both directions, and registration
/// order is preserved.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SpecialVocab<T: TokenType> {
    /// ``(literal, token)`` in registration order.
    entries: Vec<(String, T)>,

    /// ``literal => token``.
    literal_tokens: TTHashMap<String, T>,

    /// ``token => entries index``.
    token_index: TTHashMap<T, usize>,
}

impl<T: TokenType> SpecialVocab<T> {
    /// Get the number of special words in the vocab.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the vocab is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate ``(literal, token)`` entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> {
        self.entries.iter().map(|(s, t)| (s.as_str(), *t))
    }

    /// Register a special word.
    ///
    /// Re-registering an identical entry is a no-op.
    ///
    /// ## Errors
    /// [`TiztokenError::SpecialConflict`] if the word or the token is
    /// already bound to a different counterpart.
    pub fn register(
        &mut self,
        word: &str,
        token: T,
    ) -> TTResult<()> {
        if let Some(&existing) = self.literal_tokens.get(word) {
            if existing == token {
                return Ok(());
            }
            return Err(TiztokenError::SpecialConflict(format!(
                "{word:?} is already registered as {existing}"
            )));
        }

        if let Some(other) = self.lookup_word(token) {
            return Err(TiztokenError::SpecialConflict(format!(
                "token {token} is already registered as {other:?}"
            )));
        }

        if word.is_empty() {
            return Err(TiztokenError::SpecialConflict(
                "special words must be non-empty".to_string(),
            ));
        }

        self.token_index.insert(token, self.entries.len());
        self.literal_tokens.insert(word.to_string(), token);
        self.entries.push((word.to_string(), token));
        Ok(())
    }

    /// Extend the vocabulary with the given special words.
    ///
    /// ## Arguments
    /// * `special_words` - An iterator of word strings and tokens.
    ///
    /// ## Returns
    /// The updated `SpecialVocab` instance.
    pub fn with_special_words<W, S>(
        self,
        special_words: W,
    ) -> TTResult<Self>
    where
        W: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let mut vocab = self;
        for (word, token) in special_words {
            vocab.register(word.as_ref(), token)?;
        }
        Ok(vocab)
    }

    /// Return the associated token for the word, if any.
    pub fn lookup_token(
        &self,
        word: &str,
    ) -> Option<T> {
        self.literal_tokens.get(word).copied()
    }

    /// Get the associated word for a token, if any.
    pub fn lookup_word(
        &self,
        token: T,
    ) -> Option<&str> {
        self.token_index
            .get(&token)
            .map(|&idx| self.entries[idx].0.as_str())
    }

    /// Get the regex pattern matching any of the special words.
    ///
    /// ## Returns
    /// `None` if no special words are present;
    /// and `Some(RegexWrapperPattern)` otherwise.
    pub fn special_pattern(&self) -> Option<RegexWrapperPattern> {
        if self.is_empty() {
            return None;
        }
        let alts = self.entries.iter().map(|(s, _)| s).collect::<Vec<_>>();
        Some(exact_match_union_regex_pattern(&alts))
    }
}

impl<T: TokenType> TokenVocab<T> for SpecialVocab<T> {
    fn tokens(&self) -> Vec<T> {
        let mut tokens = self.entries.iter().map(|&(_, t)| t).collect::<Vec<_>>();
        tokens.sort();
        tokens
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn span_pairs(&self) -> impl Iterator<Item = (Vec<u8>, T)> {
        let mut pairs = self
            .entries
            .iter()
            .map(|(s, t)| (s.as_bytes().to_vec(), *t))
            .collect::<Vec<_>>();
        pairs.sort_by_key(|(_, t)| *t);
        pairs.into_iter()
    }
}
