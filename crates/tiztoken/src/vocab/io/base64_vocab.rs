//! # Tiktoken Vocabulary IO

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use base64::{Engine, prelude::BASE64_STANDARD};

use crate::{
    errors::{TTResult, TiztokenError},
    types::TokenType,
    vocab::{SpanTokenMap, utility::validators::try_token},
};

/// Load a [`SpanTokenMap`] from a base64 vocab file.
///
/// Lines are:
/// ```terminaloutput
/// {BASE64 SPAN} {TOKEN}
/// ```
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_base64_span_map_path<T, P>(path: P) -> TTResult<SpanTokenMap<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    read_base64_span_map(reader)
}

/// Read a [`SpanTokenMap`] from a base64 vocab line reader.
///
/// Lines are:
/// ```terminaloutput
/// {BASE64 SPAN} {TOKEN}
/// ```
///
/// # Arguments
/// * `reader` - the line reader.
pub fn read_base64_span_map<T, R>(reader: R) -> TTResult<SpanTokenMap<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut vocab = SpanTokenMap::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let s = line.trim_end();
        if s.is_empty() {
            continue;
        }

        let (span, id) = s
            .split_once(' ')
            .ok_or_else(|| TiztokenError::format(idx + 1, "expected '{BASE64 SPAN} {TOKEN}'"))?;

        let span = BASE64_STANDARD
            .decode(span)
            .map_err(|e| TiztokenError::Parse(e.to_string()))?;

        let id: u64 = id
            .parse()
            .map_err(|e: core::num::ParseIntError| TiztokenError::Parse(e.to_string()))?;

        vocab.insert(span, try_token(id)?);
    }

    Ok(vocab)
}

/// Save a [`SpanTokenMap`] to a base64 vocab file.
///
/// # Arguments
/// * `span_map` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_base64_span_map_path<T: TokenType, P: AsRef<Path>>(
    span_map: &SpanTokenMap<T>,
    path: P,
) -> TTResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_base64_span_map(span_map, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [`SpanTokenMap`] to a [`Write`] writer, in token order.
///
/// # Arguments
/// * `span_map` - the vocabulary to save.
/// * `writer` - the writer to target.
pub fn write_base64_span_map<T, W>(
    span_map: &SpanTokenMap<T>,
    writer: &mut W,
) -> TTResult<()>
where
    T: TokenType,
    W: Write,
{
    let mut items: Vec<(T, &Vec<u8>)> = span_map
        .iter()
        .map(|(chunk, &token)| (token, chunk))
        .collect();
    items.sort_by_key(|(t, _)| *t);

    for (token, chunk) in items {
        writeln!(writer, "{} {}", BASE64_STANDARD.encode(chunk), token)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_tiktoken() {
        type T = u32;

        let mut span_map: SpanTokenMap<T> = Default::default();
        span_map.insert("apple".as_bytes().to_vec(), 300);
        span_map.insert("banana".as_bytes().to_vec(), 301);
        span_map.insert("pear".as_bytes().to_vec(), 302);

        let dir = tempdir::TempDir::new("vocab_test").unwrap();
        let path = dir.path().join("vocab.tiktoken");

        save_base64_span_map_path(&span_map, &path).expect("Failed to save vocab");
        let loaded_vocab = load_base64_span_map_path(&path).expect("Failed to load vocab");

        assert_eq!(&loaded_vocab, &span_map);
    }

    #[test]
    fn test_read_errors() {
        let bad_line = read_base64_span_map::<u32, _>("YQ==\n".as_bytes());
        assert!(matches!(bad_line, Err(TiztokenError::Format { line: 1, .. })));

        let bad_b64 = read_base64_span_map::<u32, _>("!!! 3\n".as_bytes());
        assert!(matches!(bad_b64, Err(TiztokenError::Parse(_))));

        let too_big = read_base64_span_map::<u8, _>("YQ== 300\n".as_bytes());
        assert!(matches!(too_big, Err(TiztokenError::TokenOutOfRange)));

        let ok = read_base64_span_map::<u32, _>("YQ== 97\n\n".as_bytes()).unwrap();
        assert_eq!(ok.get(b"a".as_slice()), Some(&97));
    }
}
