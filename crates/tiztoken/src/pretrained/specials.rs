//! # Special Tokens

/// ``<|endoftext|>``
pub const ENDOFTEXT: &str = "<|endoftext|>";

/// ``<|fim_prefix|>``
pub const FIM_PREFIX: &str = "<|fim_prefix|>";

/// ``<|fim_middle|>``
pub const FIM_MIDDLE: &str = "<|fim_middle|>";

/// ``<|fim_suffix|>``
pub const FIM_SUFFIX: &str = "<|fim_suffix|>";

/// ``<|endofprompt|>``
pub const ENDOFPROMPT: &str = "<|endofprompt|>";

/// The GPT-4 ``cl100k_base`` special tokens.
pub const GPT4_SPECIAL_TOKENS: &[(&str, u32)] = &[
    (ENDOFTEXT, 100257),
    (FIM_PREFIX, 100258),
    (FIM_MIDDLE, 100259),
    (FIM_SUFFIX, 100260),
    (ENDOFPROMPT, 100276),
];
