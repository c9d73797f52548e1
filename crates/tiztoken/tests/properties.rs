#![allow(missing_docs)]

use std::sync::LazyLock;

use tiztoken::{
    AllowedSpecial,
    BpeTokenizer,
    Tokenizer,
    TiztokenError,
    pretrained::specials::ENDOFTEXT,
};

const CORPUS: &str = "\
The quick brown fox jumps over the lazy dog. The dog sleeps; the fox runs.
It's a beautiful day, and I'll be taking my 3 dogs for a walk at 10:45.
Don't forget: the temperature is 72 degrees!   Multiple   spaces here.
line1\nline2\r\nline3\n\n\tTabbed\ttext\tfollows.
caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d} \u{4f60}\u{597d} \u{1f600}\u{1f680}
123 + 456 = 579; 1000000 / 7 = 142857.142857
hello world hello world hello world, hello there world.
";

const SAMPLES: &[&str] = &[
    "hello world",
    "The quick brown fox jumps over the lazy dog.",
    "It's a beautiful day, and I'll be taking my 3 dogs for a walk.",
    "  multiple   spaces  ",
    "line1\nline2\r\nline3",
    "123 + 456 = 789",
    "caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d}",
    "$$$!!!...---",
    " ",
    "a",
    "",
    "\t\ttabs\tand\tspaces ",
    "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
    "mixed: hello\u{00a0}world\u{2003}wide",
];

fn trained(
    mut tok: BpeTokenizer<u32>,
    vocab_size: usize,
) -> BpeTokenizer<u32> {
    tok.train(CORPUS, vocab_size).unwrap();
    tok
}

static BASIC: LazyLock<BpeTokenizer<u32>> =
    LazyLock::new(|| trained(BpeTokenizer::basic().unwrap(), 400));

static GPT4: LazyLock<BpeTokenizer<u32>> =
    LazyLock::new(|| trained(BpeTokenizer::gpt4().unwrap(), 400));

#[test]
fn wikipedia_bpe_example() {
    let mut tok: BpeTokenizer<u32> = BpeTokenizer::basic().unwrap();
    tok.train("aaabdaaabac", 259).unwrap();

    let ids = tok.try_encode("aaabdaaabac", &AllowedSpecial::None).unwrap();
    assert_eq!(ids, vec![258, 100, 258, 97, 99]);
    assert_eq!(tok.decode(&[258, 100, 258, 97, 99]).unwrap(), "aaabdaaabac");
}

#[test]
fn special_token_after_training() {
    let mut tok: BpeTokenizer<u32> = BpeTokenizer::gpt4().unwrap();
    tok.train(CORPUS, 32768).unwrap();
    tok.register_special_tokens(&[(ENDOFTEXT, 32768)]).unwrap();

    let ids = tok
        .try_encode("<|endoftext|>hello world", &AllowedSpecial::All)
        .unwrap();
    assert_eq!(ids[0], 32768);
    assert_eq!(&ids[1..], tok.encode_ordinary("hello world").as_slice());
    assert_eq!(tok.decode(&ids).unwrap(), "<|endoftext|>hello world");
}

#[test]
fn round_trip_all_variants() {
    let gpt2 = trained(BpeTokenizer::gpt2().unwrap(), 350);

    for tok in [&*BASIC, &*GPT4, &gpt2] {
        for text in SAMPLES.iter().chain([CORPUS].iter()) {
            let ids = tok.try_encode(text, &AllowedSpecial::None).unwrap();
            assert_eq!(&tok.decode(&ids).unwrap(), text, "{tok:?}: {text:?}");
        }
    }
}

#[test]
fn training_compresses() {
    for tok in [&*BASIC, &*GPT4] {
        // each merge removed at least one token from the corpus.
        let ids = tok.encode_ordinary(CORPUS);
        assert!(ids.len() + tok.merges().num_merges() <= CORPUS.len());
    }
}

#[test]
fn training_is_deterministic() {
    let a = trained(BpeTokenizer::gpt4().unwrap(), 400);
    assert_eq!(a.merges(), GPT4.merges());

    for text in SAMPLES {
        assert_eq!(a.encode_ordinary(text), GPT4.encode_ordinary(text));
    }
}

#[test]
fn larger_vocab_extends_smaller() {
    let small = trained(BpeTokenizer::gpt4().unwrap(), 300);
    let small_rules = small.merges().rules();

    assert_eq!(&GPT4.merges().rules()[..small_rules.len()], small_rules);
    assert!(GPT4.merges().num_merges() >= small.merges().num_merges());
}

#[test]
fn merges_respect_chunk_boundaries() {
    let is_letter = |b: &u8| b.is_ascii_alphabetic();
    let is_digit = |b: &u8| b.is_ascii_digit();

    for &(_, token) in GPT4.merges().rules() {
        let span = GPT4.merges().expand(token).unwrap();
        assert!(
            !(span.iter().any(is_letter) && span.iter().any(is_digit)),
            "token {token} ({span:?}) mixes letters and digits"
        );
        assert!(
            !span.windows(2).any(|w| w[0].is_ascii_alphanumeric() && w[1] == b' '),
            "token {token} ({span:?}) spans a word end"
        );
    }
}

#[test]
fn special_tokens_are_isolated() {
    let mut tok = GPT4.clone();
    tok.register_special_tokens(&[(ENDOFTEXT, 100257), ("<|pad|>", 100258)])
        .unwrap();

    let text = "hi <|endoftext|> there<|pad|>";
    let ordinary = tok.encode_ordinary(text);
    assert!(!ordinary.contains(&100257));
    assert!(!ordinary.contains(&100258));

    assert_eq!(tok.try_encode(text, &AllowedSpecial::None).unwrap(), ordinary);

    let only_pad = tok
        .try_encode(text, &AllowedSpecial::set(["<|pad|>"]))
        .unwrap();
    assert!(!only_pad.contains(&100257));
    assert_eq!(only_pad.iter().filter(|&&t| t == 100258).count(), 1);

    let all = tok.try_encode(text, &AllowedSpecial::All).unwrap();
    assert_eq!(all.iter().filter(|&&t| t >= 100257).count(), 2);

    for ids in [&ordinary, &only_pad, &all] {
        assert_eq!(tok.decode(ids).unwrap(), text);
    }

    assert!(matches!(
        tok.try_encode(text, &AllowedSpecial::NoneRaise),
        Err(TiztokenError::DisallowedSpecial(_))
    ));
}

#[test]
fn decode_is_lossy_not_fallible() {
    // a lone UTF-8 lead byte.
    assert_eq!(BASIC.decode(&[0xE4]).unwrap(), "\u{FFFD}");

    assert!(matches!(
        BASIC.decode(&[1_000_000]),
        Err(TiztokenError::UnknownToken(1_000_000))
    ));
}

#[test]
fn save_load_round_trip() {
    let dir = tempdir::TempDir::new("properties").unwrap();

    for (name, tok) in [("basic", &*BASIC), ("gpt4", &*GPT4)] {
        let mut tok = tok.clone();
        tok.register_special_tokens(&[(ENDOFTEXT, 5000)]).unwrap();

        let path = tok.save(dir.path().join(name)).unwrap();
        assert!(dir.path().join(format!("{name}.vocab")).exists());

        let loaded = BpeTokenizer::<u32>::from_model_path(&path).unwrap();
        assert_eq!(loaded.merges(), tok.merges());
        assert_eq!(loaded.special_tokens(), tok.special_tokens());

        for text in SAMPLES.iter().chain(["x<|endoftext|>y"].iter()) {
            let expected = tok.try_encode(text, &AllowedSpecial::All).unwrap();
            assert_eq!(
                loaded.try_encode(text, &AllowedSpecial::All).unwrap(),
                expected
            );
            assert_eq!(loaded.decode(&expected).unwrap(), *text);
        }
    }
}

#[test]
fn batch_matches_single() {
    let batch = SAMPLES.to_vec();
    let encoded = GPT4.try_encode_batch(&batch, &AllowedSpecial::None).unwrap();

    for (text, ids) in SAMPLES.iter().zip(&encoded) {
        assert_eq!(ids, &GPT4.encode_ordinary(text));
    }
    assert_eq!(GPT4.try_decode_batch_to_strings(&encoded).unwrap(), batch);
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(256))]

    #[test]
    fn round_trip_arbitrary_text(text in "\\PC{0,200}") {
        for tok in [&*BASIC, &*GPT4] {
            let ids = tok.encode_ordinary(&text);
            proptest::prop_assert_eq!(tok.decode(&ids).unwrap(), text.clone());
        }
    }

    #[test]
    fn encoding_concatenates_over_splits(
        text in "[a-z]{0,10}( [a-z]{1,10}){0,3}",
        other in "[0-9]{1,10}",
    ) {
        // a digit run always starts a new chunk under the GPT-4 pattern.
        let joined = format!("{text}{other}");
        let mut expected = GPT4.encode_ordinary(&text);
        expected.extend(GPT4.encode_ordinary(&other));
        proptest::prop_assert_eq!(GPT4.encode_ordinary(&joined), expected);
    }
}
