//! # Split Patterns

use crate::{join_patterns, regex::ConstRegexWrapperPattern};

/// The GPT-2 word split pattern.
pub const GPT2_SPLIT_PATTERN: ConstRegexWrapperPattern =
    ConstRegexWrapperPattern::Fancy(join_patterns!(
        r"'s",
        r"'t",
        r"'re",
        r"'ve",
        r"'m",
        r"'ll",
        r"'d",
        r" ?\p{L}+",
        r" ?\p{N}+",
        r" ?[^\s\p{L}\p{N}]+",
        r"\s+(?!\S)",
        r"\s+",
    ));

/// The GPT-4 ``cl100k_base`` word split pattern.
pub const GPT4_SPLIT_PATTERN: ConstRegexWrapperPattern =
    ConstRegexWrapperPattern::Fancy(join_patterns!(
        r"'(?i:[sdmt]|ll|ve|re)",
        r"[^\r\n\p{L}\p{N}]?+\p{L}+",
        r"\p{N}{1,3}",
        r" ?[^\s\p{L}\p{N}]++[\r\n]*",
        r"\s*[\r\n]",
        r"\s+(?!\S)",
        r"\s+",
    ));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(GPT2_SPLIT_PATTERN.compile().unwrap().is_fancy());
        assert!(GPT4_SPLIT_PATTERN.compile().unwrap().is_fancy());
    }

    #[test]
    fn test_gpt4_pattern_text() {
        assert_eq!(
            GPT4_SPLIT_PATTERN.as_str(),
            r"'(?i:[sdmt]|ll|ve|re)|[^\r\n\p{L}\p{N}]?+\p{L}+|\p{N}{1,3}| ?[^\s\p{L}\p{N}]++[\r\n]*|\s*[\r\n]|\s+(?!\S)|\s+"
        );
    }
}
