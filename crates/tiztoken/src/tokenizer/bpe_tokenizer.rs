//! # Byte-Level BPE Tokenizer

use core::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::{
    decoders::{DictionaryDecoder, TokenDecoder},
    encoders::{MergeTableEncoder, TokenEncoder},
    errors::{TTResult, TiztokenError},
    pretrained::patterns::{GPT2_SPLIT_PATTERN, GPT4_SPLIT_PATTERN},
    regex::RegexWrapperPattern,
    segmentation::AllowedSpecial,
    tokenizer::{SpanningStrategy, Tokenizer},
    training::{BinaryPairVocabTrainer, BinaryPairVocabTrainerOptions},
    types::TokenType,
    vocab::{
        ByteMapVocab,
        MergeTable,
        SpecialVocab,
        io::{ModelFile, load_model_path, save_model_files},
    },
};

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        type EngineEncoder<T> = crate::rayon::ParallelRayonEncoder<T, MergeTableEncoder<T>>;
        type EngineDecoder<T> = crate::rayon::ParallelRayonDecoder<T, DictionaryDecoder<T>>;

        fn wrap_engine<T: TokenType>(
            encoder: MergeTableEncoder<T>,
            decoder: DictionaryDecoder<T>,
        ) -> (EngineEncoder<T>, EngineDecoder<T>) {
            (
                crate::rayon::ParallelRayonEncoder::new(encoder),
                crate::rayon::ParallelRayonDecoder::new(decoder),
            )
        }
    } else {
        type EngineEncoder<T> = MergeTableEncoder<T>;
        type EngineDecoder<T> = DictionaryDecoder<T>;

        fn wrap_engine<T: TokenType>(
            encoder: MergeTableEncoder<T>,
            decoder: DictionaryDecoder<T>,
        ) -> (EngineEncoder<T>, EngineDecoder<T>) {
            (encoder, decoder)
        }
    }
}

/// Trainable byte-level BPE tokenizer.
///
/// Owns its merge table, byte numbering, and special words; the encode and
/// decode engines are rebuilt whenever those change.
#[derive(Clone)]
pub struct BpeTokenizer<T: TokenType> {
    spanning: SpanningStrategy,
    merges: MergeTable<T>,
    byte_vocab: ByteMapVocab<T>,
    specials: SpecialVocab<T>,

    encoder: EngineEncoder<T>,
    decoder: EngineDecoder<T>,
}

impl<T: TokenType> Debug for BpeTokenizer<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("BpeTokenizer")
            .field("spanning", &self.spanning)
            .field("num_merges", &self.merges.num_merges())
            .field("specials", &self.specials.len())
            .finish()
    }
}

impl<T: TokenType> BpeTokenizer<T> {
    /// Create an untrained tokenizer.
    ///
    /// ## Arguments
    /// * `spanning` - The pre-tokenization strategy.
    ///
    /// ## Returns
    /// A new `BpeTokenizer`, or an error if the pattern does not compile.
    pub fn new<S: Into<SpanningStrategy>>(spanning: S) -> TTResult<Self> {
        Self::from_parts(
            spanning.into(),
            MergeTable::new(),
            ByteMapVocab::default(),
            SpecialVocab::default(),
        )
    }

    /// Create an untrained tokenizer without pre-tokenization.
    pub fn basic() -> TTResult<Self> {
        Self::new(SpanningStrategy::None)
    }

    /// Create an untrained tokenizer splitting on a word pattern.
    pub fn with_pattern<P: Into<RegexWrapperPattern>>(pattern: P) -> TTResult<Self> {
        Self::new(SpanningStrategy::Pattern(pattern.into()))
    }

    /// Create an untrained tokenizer with the GPT-2 split pattern.
    pub fn gpt2() -> TTResult<Self> {
        Self::new(GPT2_SPLIT_PATTERN)
    }

    /// Create an untrained tokenizer with the GPT-4 split pattern.
    pub fn gpt4() -> TTResult<Self> {
        Self::new(GPT4_SPLIT_PATTERN)
    }

    /// Assemble a tokenizer from its tables.
    ///
    /// ## Arguments
    /// * `spanning` - The pre-tokenization strategy.
    /// * `merges` - The merge rules, over canonical byte tokens.
    /// * `byte_vocab` - The external numbering of the single-byte tokens.
    /// * `specials` - The special words.
    ///
    /// ## Errors
    /// [`TiztokenError::SpecialConflict`] if a special token is also a byte
    /// or merge token.
    pub fn from_parts(
        spanning: SpanningStrategy,
        merges: MergeTable<T>,
        byte_vocab: ByteMapVocab<T>,
        specials: SpecialVocab<T>,
    ) -> TTResult<Self> {
        for (word, token) in specials.iter() {
            check_special(&merges, word, token)?;
        }

        let word_re = spanning.compile()?;
        let decoder = DictionaryDecoder::from_vocabs(&merges, &byte_vocab, &specials);
        let encoder =
            MergeTableEncoder::init(merges.clone(), byte_vocab.clone(), specials.clone(), word_re)?;
        let (encoder, decoder) = wrap_engine(encoder, decoder);

        Ok(Self {
            spanning,
            merges,
            byte_vocab,
            specials,
            encoder,
            decoder,
        })
    }

    /// Load a tokenizer from a ``.model`` file.
    pub fn from_model_path<P: AsRef<Path>>(path: P) -> TTResult<Self> {
        let ModelFile {
            pattern,
            specials,
            merges,
        } = load_model_path(path)?;

        Self::from_parts(
            SpanningStrategy::from_pattern_str(&pattern),
            merges,
            ByteMapVocab::default(),
            specials,
        )
    }

    /// The pre-tokenization strategy.
    pub fn spanning(&self) -> &SpanningStrategy {
        &self.spanning
    }

    /// The merge rules.
    pub fn merges(&self) -> &MergeTable<T> {
        &self.merges
    }

    /// The single-byte token numbering.
    pub fn byte_vocab(&self) -> &ByteMapVocab<T> {
        &self.byte_vocab
    }

    /// The total number of tokens: bytes, merges, and special words.
    pub fn vocab_size(&self) -> usize {
        256 + self.merges.num_merges() + self.specials.len()
    }

    /// Learn merges from a sequence of samples, replacing any existing merges.
    ///
    /// Registered special words are kept; the byte numbering resets to
    /// the identity.
    ///
    /// ## Arguments
    /// * `samples` - The training corpus.
    /// * `vocab_size` - The target vocabulary size; must be > 256.
    pub fn train_samples<I>(
        &mut self,
        samples: I,
        vocab_size: usize,
    ) -> TTResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut options = BinaryPairVocabTrainerOptions::new(vocab_size);
        if let Some(pattern) = self.spanning.pattern() {
            options = options.with_pattern(pattern.clone());
        }

        let mut trainer: BinaryPairVocabTrainer = options.init()?;
        trainer.update_from_samples(samples);
        let merges = trainer.train::<T>()?;

        *self = Self::from_parts(
            self.spanning.clone(),
            merges,
            ByteMapVocab::default(),
            self.specials.clone(),
        )?;
        Ok(())
    }
}

fn check_special<T: TokenType>(
    merges: &MergeTable<T>,
    word: &str,
    token: T,
) -> TTResult<()> {
    if merges.contains_token(token) {
        return Err(TiztokenError::SpecialConflict(format!(
            "{word:?} cannot use token {token}; it is a byte or merge token"
        )));
    }
    Ok(())
}

impl<T: TokenType> Tokenizer<T> for BpeTokenizer<T> {
    fn train(
        &mut self,
        text: &str,
        vocab_size: usize,
    ) -> TTResult<()> {
        self.train_samples([text], vocab_size)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn try_encode(
        &self,
        text: &str,
        allowed: &AllowedSpecial,
    ) -> TTResult<Vec<T>> {
        self.encoder.try_encode(text, allowed)
    }

    fn encode_ordinary(
        &self,
        text: &str,
    ) -> Vec<T> {
        self.encoder.encode_ordinary(text)
    }

    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TTResult<Vec<u8>> {
        self.decoder.try_decode_to_bytes(tokens)
    }

    fn register_special_tokens(
        &mut self,
        specials: &[(&str, T)],
    ) -> TTResult<()> {
        let mut vocab = self.specials.clone();
        for &(word, token) in specials {
            check_special(&self.merges, word, token)?;
            vocab.register(word, token)?;
        }

        *self = Self::from_parts(
            self.spanning.clone(),
            self.merges.clone(),
            self.byte_vocab.clone(),
            vocab,
        )?;
        log::info!(
            "registered {} special tokens ({} total)",
            specials.len(),
            self.specials.len()
        );
        Ok(())
    }

    fn special_tokens(&self) -> &SpecialVocab<T> {
        &self.specials
    }

    fn save<P: AsRef<Path>>(
        &self,
        prefix: P,
    ) -> TTResult<PathBuf> {
        if !self.byte_vocab.is_identity() {
            return Err(TiztokenError::Unsupported(
                "model files cannot store a permuted byte numbering".to_string(),
            ));
        }
        save_model_files(
            self.spanning.pattern_str(),
            &self.specials,
            &self.merges,
            prefix,
        )
    }

    fn load<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> TTResult<()> {
        *self = Self::from_model_path(path)?;
        Ok(())
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
        allowed: &AllowedSpecial,
    ) -> TTResult<Vec<Vec<T>>> {
        self.encoder.try_encode_batch(batch, allowed)
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[Vec<T>],
    ) -> TTResult<Vec<String>> {
        self.decoder.try_decode_batch_to_strings(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pretrained::specials::ENDOFTEXT, types::static_is_send_sync_check};

    #[test]
    fn test_basic_train_encode_decode() {
        let mut tok: BpeTokenizer<u32> = BpeTokenizer::basic().unwrap();
        static_is_send_sync_check(&tok);

        tok.train("aaabdaaabac", 259).unwrap();
        assert_eq!(tok.merges().num_merges(), 3);
        assert_eq!(tok.vocab_size(), 259);

        let ids = tok
            .try_encode("aaabdaaabac", &AllowedSpecial::None)
            .unwrap();
        assert_eq!(ids, vec![258, 100, 258, 97, 99]);
        assert_eq!(tok.decode(&ids).unwrap(), "aaabdaaabac");
    }

    #[test]
    fn test_untrained_is_bytes() {
        let tok: BpeTokenizer<u16> = BpeTokenizer::gpt4().unwrap();
        assert_eq!(tok.encode_ordinary("hi!"), vec![104, 105, 33]);
        assert_eq!(tok.decode(&[104, 105, 33]).unwrap(), "hi!");
    }

    #[test]
    fn test_train_errors() {
        let mut tok: BpeTokenizer<u32> = BpeTokenizer::basic().unwrap();
        assert!(matches!(
            tok.train("abc", 256),
            Err(TiztokenError::VocabSizeTooSmall { size: 256 })
        ));
        assert!(BpeTokenizer::<u32>::with_pattern("(").is_err());
    }

    #[test]
    fn test_register_special_tokens() {
        let mut tok: BpeTokenizer<u32> = BpeTokenizer::gpt4().unwrap();
        tok.train("hello world hello world", 270).unwrap();

        tok.register_special_tokens(&[(ENDOFTEXT, 1000)]).unwrap();
        // identical re-registration is a no-op.
        tok.register_special_tokens(&[(ENDOFTEXT, 1000)]).unwrap();
        assert_eq!(tok.special_tokens().len(), 1);

        let ids = tok
            .try_encode("<|endoftext|>hello world", &AllowedSpecial::All)
            .unwrap();
        assert_eq!(ids[0], 1000);
        assert_eq!(&ids[1..], tok.encode_ordinary("hello world").as_slice());
        assert_eq!(tok.decode(&ids).unwrap(), "<|endoftext|>hello world");

        assert!(matches!(
            tok.register_special_tokens(&[(ENDOFTEXT, 1001)]),
            Err(TiztokenError::SpecialConflict(_))
        ));
        assert!(matches!(
            tok.register_special_tokens(&[("<|other|>", 1000)]),
            Err(TiztokenError::SpecialConflict(_))
        ));
        assert!(matches!(
            tok.register_special_tokens(&[("<|merge|>", 256)]),
            Err(TiztokenError::SpecialConflict(_))
        ));
        assert!(matches!(
            tok.register_special_tokens(&[("<|byte|>", 7)]),
            Err(TiztokenError::SpecialConflict(_))
        ));

        // all or nothing.
        assert!(
            tok.register_special_tokens(&[("<|ok|>", 2000), ("<|bad|>", 1000)])
                .is_err()
        );
        assert_eq!(tok.special_tokens().lookup_token("<|ok|>"), None);
    }

    #[test]
    fn test_specials_survive_training() {
        let mut tok: BpeTokenizer<u32> = BpeTokenizer::basic().unwrap();
        tok.register_special_tokens(&[(ENDOFTEXT, 5000)]).unwrap();
        tok.train("abab", 258).unwrap();
        assert_eq!(tok.special_tokens().lookup_token(ENDOFTEXT), Some(5000));

        // a registered token inside the new merge range is a conflict.
        let mut tok: BpeTokenizer<u32> = BpeTokenizer::basic().unwrap();
        tok.register_special_tokens(&[(ENDOFTEXT, 256)]).unwrap();
        assert!(matches!(
            tok.train("abab", 258),
            Err(TiztokenError::SpecialConflict(_))
        ));
        assert_eq!(tok.merges().num_merges(), 0);
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir::TempDir::new("bpe_tokenizer").unwrap();
        let prefix = dir.path().join("tok");

        let mut tok: BpeTokenizer<u32> = BpeTokenizer::gpt4().unwrap();
        tok.train("the quick brown fox jumps over the lazy dog; the end", 300)
            .unwrap();
        tok.register_special_tokens(&[(ENDOFTEXT, 300)]).unwrap();

        let path = tok.save(&prefix).unwrap();
        assert_eq!(path, dir.path().join("tok.model"));

        let mut loaded: BpeTokenizer<u32> = BpeTokenizer::basic().unwrap();
        loaded.load(&path).unwrap();

        assert_eq!(loaded.spanning().pattern_str(), tok.spanning().pattern_str());
        assert_eq!(loaded.merges(), tok.merges());
        assert_eq!(loaded.special_tokens(), tok.special_tokens());

        let text = "the lazy fox<|endoftext|>";
        assert_eq!(
            loaded.try_encode(text, &AllowedSpecial::All).unwrap(),
            tok.try_encode(text, &AllowedSpecial::All).unwrap()
        );
    }

    #[test]
    fn test_load_rejects_malformed_model() {
        let dir = tempdir::TempDir::new("bpe_tokenizer").unwrap();
        let cases = [
            ("special_collides.model", "tiztoken v1\n\n1\n<|x|> 256\n97 97\n", 4),
            ("blank_merge.model", "tiztoken v1\n\n0\n97 97\n\n97 98\n", 5),
        ];
        for (name, text, expected_line) in cases {
            let path = dir.path().join(name);
            std::fs::write(&path, text).unwrap();
            match BpeTokenizer::<u32>::from_model_path(&path) {
                Err(TiztokenError::Format { line, .. }) => assert_eq!(line, expected_line, "{name}"),
                other => panic!("{name}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_batch() {
        let mut tok: BpeTokenizer<u32> = BpeTokenizer::gpt2().unwrap();
        tok.train("one two three two one", 280).unwrap();

        let batch = ["one two", "three"];
        let encoded = tok.try_encode_batch(&batch, &AllowedSpecial::None).unwrap();
        assert_eq!(encoded[1], tok.encode_ordinary("three"));
        assert_eq!(tok.try_decode_batch_to_strings(&encoded).unwrap(), batch);
    }
}
