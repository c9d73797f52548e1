//! # Model File IO
//!
//! A saved model is a pair of text files sharing a prefix.
//!
//! ``{prefix}.model`` is read back by [`load_model_path`]:
//! ```terminaloutput
//! tiztoken v1
//! {SPLIT PATTERN, EMPTY FOR NONE}
//! {SPECIAL COUNT}
//! {SPECIAL LITERAL} {TOKEN}
//! ...
//! {LEFT} {RIGHT}
//! ...
//! ```
//! The result of the ``i``-th merge line is ``256 + i``; it is never stored.
//!
//! ``{prefix}.vocab`` is a lossy listing for human inspection only.

use std::{
    ffi::OsString,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    errors::{TTResult, TiztokenError},
    types::TokenType,
    vocab::{
        ByteMapVocab,
        MergeTable,
        SpecialVocab,
        TokenVocab,
        utility::{strings::render_token, validators::try_token},
    },
};

/// The model file version tag.
pub const MODEL_VERSION: &str = "tiztoken v1";

/// Model file suffix.
pub const MODEL_SUFFIX: &str = ".model";

/// Vocab listing suffix.
pub const VOCAB_SUFFIX: &str = ".vocab";

/// The persisted state of a tokenizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelFile<T: TokenType> {
    /// The split pattern; empty for no splitting.
    pub pattern: String,

    /// Special words, in registration order.
    pub specials: SpecialVocab<T>,

    /// Merge rules, in creation order.
    pub merges: MergeTable<T>,
}

/// Append a suffix to a path prefix.
///
/// ``"out/tok"`` with ``".model"`` becomes ``"out/tok.model"``.
pub fn with_suffix<P: AsRef<Path>>(
    prefix: P,
    suffix: &str,
) -> PathBuf {
    let mut name: OsString = prefix.as_ref().as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Save ``{prefix}.model`` and ``{prefix}.vocab``.
///
/// ## Arguments
/// * `pattern` - the split pattern; empty for none.
/// * `specials` - the special words.
/// * `merges` - the merge table; result ids must be dense.
/// * `prefix` - the output path prefix.
///
/// ## Returns
/// The path of the model file.
pub fn save_model_files<T: TokenType, P: AsRef<Path>>(
    pattern: &str,
    specials: &SpecialVocab<T>,
    merges: &MergeTable<T>,
    prefix: P,
) -> TTResult<PathBuf> {
    let model_path = with_suffix(&prefix, MODEL_SUFFIX);
    let vocab_path = with_suffix(&prefix, VOCAB_SUFFIX);

    // validate before touching the filesystem.
    let mut buf = Vec::new();
    write_model(pattern, specials, merges, &mut buf)?;
    std::fs::write(&model_path, buf)?;

    let mut writer = BufWriter::new(File::create(&vocab_path)?);
    write_vocab_listing(merges, &ByteMapVocab::default(), specials, &mut writer)?;
    writer.flush()?;

    log::info!(
        "saved {} merges and {} special tokens to {}",
        merges.num_merges(),
        specials.len(),
        model_path.display()
    );
    Ok(model_path)
}

/// Load a ``.model`` file.
pub fn load_model_path<T: TokenType, P: AsRef<Path>>(path: P) -> TTResult<ModelFile<T>> {
    let path = path.as_ref();
    let model = read_model(BufReader::new(File::open(path)?))?;
    log::info!(
        "loaded {} merges and {} special tokens from {}",
        model.merges.num_merges(),
        model.specials.len(),
        path.display()
    );
    Ok(model)
}

/// Write the ``.model`` text.
///
/// ## Errors
/// [`TiztokenError::Unsupported`] when the state cannot be represented:
/// merge results that are not dense, or a newline in the pattern or a literal.
pub fn write_model<T: TokenType, W: Write>(
    pattern: &str,
    specials: &SpecialVocab<T>,
    merges: &MergeTable<T>,
    writer: &mut W,
) -> TTResult<()> {
    if !merges.is_dense() {
        return Err(TiztokenError::Unsupported(
            "model files require dense merge ids".to_string(),
        ));
    }
    if pattern.contains(['\n', '\r']) {
        return Err(TiztokenError::Unsupported(
            "pattern contains a line break".to_string(),
        ));
    }

    writeln!(writer, "{MODEL_VERSION}")?;
    writeln!(writer, "{pattern}")?;

    writeln!(writer, "{}", specials.len())?;
    for (word, token) in specials.iter() {
        if word.contains(['\n', '\r']) {
            return Err(TiztokenError::Unsupported(format!(
                "special token {word:?} contains a line break"
            )));
        }
        writeln!(writer, "{word} {token}")?;
    }

    for &((a, b), _) in merges.rules() {
        writeln!(writer, "{a} {b}")?;
    }

    Ok(())
}

fn parse_id<T: TokenType>(
    line: usize,
    field: &str,
) -> TTResult<T> {
    let id: u64 = field
        .parse()
        .map_err(|_| TiztokenError::format(line, format!("expected an integer, got {field:?}")))?;
    try_token(id).map_err(|_| TiztokenError::format(line, format!("id {id} is out of range")))
}

/// Read the ``.model`` text.
///
/// Merges are replayed in file order. Any deviation from the format is a
/// [`TiztokenError::Format`]; nothing is repaired.
pub fn read_model<T: TokenType, R: BufRead>(reader: R) -> TTResult<ModelFile<T>> {
    let mut lines = reader.lines().enumerate().map(|(idx, line)| {
        line.map(|l| (idx + 1, l.trim_end_matches(['\r', '\n']).to_string()))
    });
    let mut next_line = |what: &str, after: usize| -> TTResult<(usize, String)> {
        lines
            .next()
            .transpose()?
            .ok_or_else(|| TiztokenError::format(after + 1, format!("missing {what}")))
    };

    let (_, version) = next_line("version line", 0)?;
    if version.trim() != MODEL_VERSION {
        return Err(TiztokenError::format(
            1,
            format!("expected {MODEL_VERSION:?}, got {version:?}"),
        ));
    }

    let (_, pattern) = next_line("pattern line", 1)?;

    let (count_line, count) = next_line("special count line", 2)?;
    let count: usize = count.trim().parse().map_err(|_| {
        TiztokenError::format(count_line, format!("expected a count, got {count:?}"))
    })?;

    let mut specials = SpecialVocab::default();
    let mut special_lines: Vec<(usize, T)> = Vec::with_capacity(count);
    let mut last = count_line;
    for _ in 0..count {
        let (line, text) = next_line("special token line", last)?;
        last = line;
        let (word, id) = text
            .rsplit_once(' ')
            .ok_or_else(|| TiztokenError::format(line, "expected '{LITERAL} {TOKEN}'"))?;
        let token = parse_id(line, id.trim())?;
        specials
            .register(word, token)
            .map_err(|e| TiztokenError::format(line, e.to_string()))?;
        special_lines.push((line, token));
    }

    let mut merges = MergeTable::new();
    while let Some((line, text)) = lines.next().transpose()? {
        if text.trim().is_empty() {
            return Err(TiztokenError::format(line, "blank line in merge section"));
        }
        let fields = text.split_whitespace().collect::<Vec<_>>();
        let [a, b] = fields.as_slice() else {
            return Err(TiztokenError::format(line, "expected '{LEFT} {RIGHT}'"));
        };
        let pair = (parse_id(line, a)?, parse_id(line, b)?);
        merges
            .push_next(pair)
            .map_err(|e| TiztokenError::format(line, e.to_string()))?;
    }

    if let Some(&(line, token)) = special_lines
        .iter()
        .find(|&&(_, token)| merges.contains_token(token))
    {
        return Err(TiztokenError::format(
            line,
            format!("special id {token} collides with a byte or merge token"),
        ));
    }

    Ok(ModelFile {
        pattern,
        specials,
        merges,
    })
}

/// Write the ``.vocab`` listing.
///
/// Merge results render as ``[left][right] -> [token] id``; bytes and
/// special words as ``[token] id``. Byte ids follow `byte_vocab`.
pub fn write_vocab_listing<T: TokenType, W: Write>(
    merges: &MergeTable<T>,
    byte_vocab: &ByteMapVocab<T>,
    specials: &SpecialVocab<T>,
    writer: &mut W,
) -> TTResult<()> {
    let render = |t: T| merges.expand(t).map(render_token).unwrap_or_default();

    let mut entries: Vec<(T, Vec<u8>)> = byte_vocab.span_pairs().map(|(span, t)| (t, span)).collect();
    entries.extend(
        merges
            .rules()
            .iter()
            .filter_map(|&(_, t)| merges.expand(t).map(|span| (t, span.to_vec()))),
    );
    entries.extend(specials.span_pairs().map(|(span, t)| (t, span)));
    entries.sort_by_key(|&(t, _)| t);

    for (token, span) in entries {
        match merges.lookup_parents(token) {
            Some((a, b)) => writeln!(
                writer,
                "[{}][{}] -> [{}] {}",
                render(a),
                render(b),
                render_token(&span),
                token
            )?,
            None => writeln!(writer, "[{}] {}", render_token(&span), token)?,
        }
    }
    Ok(())
}
