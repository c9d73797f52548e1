//! # Special Token Encode Policy

use crate::types::{TTHashSet, TokenType};
use crate::vocab::SpecialVocab;

/// Which special words are matched when encoding.
///
/// Text matching a special word which is not allowed is encoded as
/// ordinary text; it can never produce the special token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AllowedSpecial {
    /// Every registered special word.
    All,

    /// No special words; they encode as ordinary text.
    #[default]
    None,

    /// No special words; encoding fails if any registered word occurs.
    NoneRaise,

    /// Only the named special words. Unregistered names are ignored.
    Set(TTHashSet<String>),
}

impl AllowedSpecial {
    /// Build an explicit allow-set.
    pub fn set<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Set(words.into_iter().map(Into::into).collect())
    }

    /// The registered words this policy matches, in registration order.
    pub fn select<'v, T: TokenType>(
        &self,
        specials: &'v SpecialVocab<T>,
    ) -> Vec<&'v str> {
        match self {
            Self::All => specials.iter().map(|(w, _)| w).collect(),
            Self::None | Self::NoneRaise => Vec::new(),
            Self::Set(words) => specials
                .iter()
                .map(|(w, _)| w)
                .filter(|w| words.contains(*w))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        let specials: SpecialVocab<u32> = SpecialVocab::default()
            .with_special_words([("<|a|>", 300), ("<|b|>", 301)])
            .unwrap();

        assert_eq!(AllowedSpecial::All.select(&specials), vec!["<|a|>", "<|b|>"]);
        assert!(AllowedSpecial::None.select(&specials).is_empty());
        assert!(AllowedSpecial::NoneRaise.select(&specials).is_empty());
        assert_eq!(
            AllowedSpecial::set(["<|b|>", "<|unknown|>"]).select(&specials),
            vec!["<|b|>"]
        );
        assert_eq!(AllowedSpecial::default(), AllowedSpecial::None);
    }
}
