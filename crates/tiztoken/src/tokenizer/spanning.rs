//! # Spanning Strategy

use crate::{
    errors::TTResult,
    regex::{ConstRegexWrapperPattern, RegexWrapper, RegexWrapperPattern},
};

/// How text is pre-tokenized into chunks before merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpanningStrategy {
    /// No splitting; each stretch of text between special words is one chunk.
    #[default]
    None,

    /// Split along the matches of a word pattern.
    Pattern(RegexWrapperPattern),
}

impl SpanningStrategy {
    /// Build a strategy from a model file pattern line; empty means none.
    pub fn from_pattern_str(pattern: &str) -> Self {
        if pattern.is_empty() {
            Self::None
        } else {
            Self::Pattern(pattern.into())
        }
    }

    /// The pattern text, as saved in a model file; empty for none.
    pub fn pattern_str(&self) -> &str {
        match self {
            Self::None => "",
            Self::Pattern(pattern) => pattern.as_str(),
        }
    }

    /// The pattern, if any.
    pub fn pattern(&self) -> Option<&RegexWrapperPattern> {
        match self {
            Self::None => None,
            Self::Pattern(pattern) => Some(pattern),
        }
    }

    /// Compile the word split regex.
    pub fn compile(&self) -> TTResult<Option<RegexWrapper>> {
        Ok(self.pattern().map(|p| p.compile()).transpose()?)
    }
}

impl From<RegexWrapperPattern> for SpanningStrategy {
    fn from(pattern: RegexWrapperPattern) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<ConstRegexWrapperPattern> for SpanningStrategy {
    fn from(pattern: ConstRegexWrapperPattern) -> Self {
        Self::Pattern(pattern.into())
    }
}

impl From<&str> for SpanningStrategy {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pretrained::patterns::GPT4_SPLIT_PATTERN;

    #[test]
    fn test_pattern_str_round_trip() {
        assert_eq!(SpanningStrategy::from_pattern_str(""), SpanningStrategy::None);
        assert_eq!(SpanningStrategy::None.pattern_str(), "");
        assert!(SpanningStrategy::None.compile().unwrap().is_none());

        let strategy: SpanningStrategy = GPT4_SPLIT_PATTERN.into();
        let text = strategy.pattern_str();
        assert_eq!(text, GPT4_SPLIT_PATTERN.as_str());

        let reloaded = SpanningStrategy::from_pattern_str(text);
        assert_eq!(reloaded.pattern_str(), text);
        assert!(reloaded.compile().unwrap().unwrap().is_fancy());
    }

    #[test]
    fn test_bad_pattern() {
        assert!(SpanningStrategy::from("(").compile().is_err());
    }
}
