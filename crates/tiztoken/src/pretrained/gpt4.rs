//! # GPT-4 ``cl100k_base`` Replay
//!
//! Public ``tiktoken`` vocabularies are ``{ bytes -> rank }`` maps; the merge
//! order is implicit in the ranks. [`recover_merges`] rebuilds it by running
//! BPE on each multi-byte span with only the lower ranked merges available:
//! what remains are exactly the two parts the span was merged from.
//!
//! The reference numbers its single-byte tokens in its own order.
//! Internally merges run over canonical byte tokens; the
//! [`ByteMapVocab`] translates at the edges.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    errors::{TTResult, TiztokenError},
    pretrained::{patterns::GPT4_SPLIT_PATTERN, specials::GPT4_SPECIAL_TOKENS},
    segmentation::AllowedSpecial,
    tokenizer::{BpeTokenizer, Tokenizer},
    types::{TokenType, byte_token},
    vocab::{
        ByteMapVocab,
        MergeTable,
        SpanTokenMap,
        SpecialVocab,
        io::{load_base64_span_map_path, write_vocab_listing},
        utility::validators::{U8_SIZE, try_token},
    },
};

/// Replay BPE on `span`, allowing only merges ranked below `max_rank`.
///
/// ## Returns
/// The part boundaries: part ``i`` is ``span[bounds[i]..bounds[i + 1]]``.
fn replay_bounds<T: TokenType>(
    span_map: &SpanTokenMap<T>,
    span: &[u8],
    max_rank: T,
) -> Vec<usize> {
    let mut bounds: Vec<usize> = (0..=span.len()).collect();
    loop {
        let best = (0..bounds.len().saturating_sub(2))
            .filter_map(|i| {
                span_map
                    .get(&span[bounds[i]..bounds[i + 2]])
                    .filter(|&&rank| rank < max_rank)
                    .map(|&rank| (rank, i))
            })
            .min();

        match best {
            Some((_, i)) => {
                bounds.remove(i + 1);
            }
            None => return bounds,
        }
    }
}

/// Recover the ordered merge table of a ``{ bytes -> rank }`` vocabulary.
///
/// Multi-byte spans are resolved in ascending rank order; each must replay
/// to exactly two already-known parts. Single bytes resolve to canonical
/// byte tokens; their reference ranks are not used here.
///
/// ## Errors
/// * [`TiztokenError::Format`] if a span does not reduce to two parts.
/// * [`TiztokenError::VocabConflict`] if merge ranks overlap the byte range.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(span_map)))]
pub fn recover_merges<T: TokenType>(span_map: &SpanTokenMap<T>) -> TTResult<MergeTable<T>> {
    let mut entries = span_map
        .iter()
        .filter(|(span, _)| span.len() >= 2)
        .map(|(span, &rank)| (rank, span.as_slice()))
        .collect::<Vec<_>>();
    entries.sort();

    log::info!("recovering {} merges", entries.len());

    let part_token = |part: &[u8]| -> Option<T> {
        match part {
            [b] => Some(byte_token(*b)),
            _ => span_map.get(part).copied(),
        }
    };

    let mut merges = MergeTable::new();
    for (rank, span) in entries {
        let bounds = replay_bounds(span_map, span, rank);
        let [start, mid, end] = bounds.as_slice() else {
            return Err(TiztokenError::format(
                0,
                format!(
                    "span for rank {rank} replays to {} parts, expected 2",
                    bounds.len() - 1
                ),
            ));
        };

        let pair = part_token(&span[*start..*mid]).zip(part_token(&span[*mid..*end]));
        let Some(pair) = pair else {
            return Err(TiztokenError::format(
                0,
                format!("span for rank {rank} has an unknown part"),
            ));
        };

        merges.push(pair, rank)?;
    }

    log::info!("recovered {} merges", merges.num_merges());
    Ok(merges)
}

/// The GPT-4 ``cl100k_base`` tokenizer, replayed from its public vocabulary.
///
/// Encoding and decoding match ``tiktoken`` exactly, including the
/// reference special tokens. Training and model files are not supported.
#[derive(Debug, Clone)]
pub struct Gpt4Tokenizer<T: TokenType> {
    inner: BpeTokenizer<T>,
}

impl<T: TokenType> Gpt4Tokenizer<T> {
    /// Build from an in-memory ``{ bytes -> rank }`` map.
    ///
    /// ## Arguments
    /// * `span_map` - The reference vocabulary; must cover every byte, with
    ///   single-byte ranks below 256 and merge ranks from 256 up.
    ///
    /// ## Returns
    /// A new `Gpt4Tokenizer`, with the ``cl100k_base`` special tokens registered.
    pub fn from_span_map(span_map: &SpanTokenMap<T>) -> TTResult<Self> {
        let byte_vocab = ByteMapVocab::try_from_span_map(span_map)?;
        if let Some(&token) = byte_vocab
            .byte_tokens()
            .iter()
            .find(|t| t.to_usize().is_none_or(|v| v >= U8_SIZE))
        {
            return Err(TiztokenError::VocabConflict(format!(
                "single-byte rank {token} is outside the byte range"
            )));
        }

        let merges = recover_merges(span_map)?;

        let special_words = GPT4_SPECIAL_TOKENS
            .iter()
            .map(|&(word, token)| Ok((word, try_token::<T>(token.into())?)))
            .collect::<TTResult<Vec<_>>>()?;
        let specials = SpecialVocab::default().with_special_words(special_words)?;

        let inner = BpeTokenizer::from_parts(GPT4_SPLIT_PATTERN.into(), merges, byte_vocab, specials)?;
        Ok(Self { inner })
    }

    /// Load from a ``tiktoken`` base64 vocabulary file, such as ``cl100k_base.tiktoken``.
    pub fn load_tiktoken_path<P: AsRef<Path>>(path: P) -> TTResult<Self> {
        let path = path.as_ref();
        log::info!("loading reference vocabulary from {}", path.display());
        Self::from_span_map(&load_base64_span_map_path(path)?)
    }

    /// The wrapped engine.
    pub fn inner(&self) -> &BpeTokenizer<T> {
        &self.inner
    }

    /// Write the human-readable ``.vocab`` listing, in reference numbering.
    pub fn save_vocab<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> TTResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        write_vocab_listing(
            self.inner.merges(),
            self.inner.byte_vocab(),
            self.inner.special_tokens(),
            &mut writer,
        )?;
        writer.flush()?;
        Ok(())
    }
}

impl<T: TokenType> Tokenizer<T> for Gpt4Tokenizer<T> {
    fn train(
        &mut self,
        _text: &str,
        _vocab_size: usize,
    ) -> TTResult<()> {
        Err(TiztokenError::Unsupported(
            "the GPT-4 tokenizer cannot be trained".to_string(),
        ))
    }

    fn try_encode(
        &self,
        text: &str,
        allowed: &AllowedSpecial,
    ) -> TTResult<Vec<T>> {
        self.inner.try_encode(text, allowed)
    }

    fn encode_ordinary(
        &self,
        text: &str,
    ) -> Vec<T> {
        self.inner.encode_ordinary(text)
    }

    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TTResult<Vec<u8>> {
        self.inner.try_decode_to_bytes(tokens)
    }

    fn register_special_tokens(
        &mut self,
        specials: &[(&str, T)],
    ) -> TTResult<()> {
        self.inner.register_special_tokens(specials)
    }

    fn special_tokens(&self) -> &SpecialVocab<T> {
        self.inner.special_tokens()
    }

    fn save<P: AsRef<Path>>(
        &self,
        _prefix: P,
    ) -> TTResult<PathBuf> {
        Err(TiztokenError::Unsupported(
            "the GPT-4 tokenizer cannot be saved as a model file; see save_vocab".to_string(),
        ))
    }

    fn load<P: AsRef<Path>>(
        &mut self,
        _path: P,
    ) -> TTResult<()> {
        Err(TiztokenError::Unsupported(
            "the GPT-4 tokenizer cannot be loaded from a model file".to_string(),
        ))
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
        allowed: &AllowedSpecial,
    ) -> TTResult<Vec<Vec<T>>> {
        self.inner.try_encode_batch(batch, allowed)
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[Vec<T>],
    ) -> TTResult<Vec<String>> {
        self.inner.try_decode_batch_to_strings(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pretrained::specials::ENDOFTEXT;

    /// A tiny reference vocab: bytes ranked in reverse order, plus
    /// "ab" (256), "cd" (257), "abcd" (258).
    fn toy_span_map() -> SpanTokenMap<u32> {
        let mut span_map: SpanTokenMap<u32> = (0..=255u8)
            .map(|b| (vec![b], 255 - b as u32))
            .collect();
        span_map.insert(b"ab".to_vec(), 256);
        span_map.insert(b"cd".to_vec(), 257);
        span_map.insert(b"abcd".to_vec(), 258);
        span_map
    }

    #[test]
    fn test_recover_merges() {
        let merges = recover_merges(&toy_span_map()).unwrap();
        let (a, b, c, d) = (97u32, 98u32, 99u32, 100u32);
        assert_eq!(
            merges.rules(),
            &[((a, b), 256), ((c, d), 257), ((256, 257), 258)]
        );
    }

    #[test]
    fn test_recover_merges_ambiguous_span() {
        // "xyz" has no lower ranked sub-spans to replay through.
        let mut span_map = toy_span_map();
        span_map.insert(b"xyz".to_vec(), 259);
        assert!(matches!(
            recover_merges(&span_map),
            Err(TiztokenError::Format { .. })
        ));
    }

    #[test]
    fn test_byte_ranks_must_be_bytes() {
        let mut span_map = toy_span_map();
        span_map.insert(vec![0u8], 5000);
        assert!(matches!(
            Gpt4Tokenizer::from_span_map(&span_map),
            Err(TiztokenError::VocabConflict(_))
        ));
    }

    #[test]
    fn test_toy_encode_decode() {
        let tok = Gpt4Tokenizer::from_span_map(&toy_span_map()).unwrap();

        // single bytes take their reference ranks.
        assert_eq!(tok.encode_ordinary("a"), vec![255 - 97]);
        assert_eq!(tok.encode_ordinary("abcd"), vec![258]);
        assert_eq!(tok.encode_ordinary("abc"), vec![256, 255 - 99]);
        assert_eq!(tok.decode(&[256, 255 - 99]).unwrap(), "abc");

        let ids = tok
            .try_encode("<|endoftext|>abcd", &AllowedSpecial::All)
            .unwrap();
        assert_eq!(ids, vec![100257, 258]);
        assert_eq!(tok.decode(&ids).unwrap(), "<|endoftext|>abcd");
        assert_eq!(tok.special_tokens().lookup_token(ENDOFTEXT), Some(100257));
    }

    #[test]
    fn test_unsupported() {
        let mut tok = Gpt4Tokenizer::from_span_map(&toy_span_map()).unwrap();
        assert!(matches!(
            tok.train("abc", 300),
            Err(TiztokenError::Unsupported(_))
        ));
        assert!(matches!(
            tok.save("/tmp/never"),
            Err(TiztokenError::Unsupported(_))
        ));
        assert!(matches!(
            tok.load("/tmp/never.model"),
            Err(TiztokenError::Unsupported(_))
        ));
    }

    #[test]
    fn test_save_vocab() {
        let tok = Gpt4Tokenizer::from_span_map(&toy_span_map()).unwrap();
        let dir = tempdir::TempDir::new("gpt4").unwrap();
        let path = dir.path().join("gpt4.vocab");
        tok.save_vocab(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "[\u{FFFD}] 0");
        assert_eq!(lines[255 - 97], "[a] 158");
        assert_eq!(lines[258], "[ab][cd] -> [abcd] 258");
    }
}
