//! # Text Segmentor

use core::ops::Range;

use crate::{
    errors::TTResult,
    regex::{MatchesWrapper, RegexWrapper, RegexWrapperPattern, exact_match_union_regex_pattern},
};

/// Span Reference for [`TextSegmentor`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanRef {
    /// A span matched by the word pattern.
    Word(Range<usize>),

    /// A special word.
    Special(Range<usize>),

    /// Text between word matches.
    ///
    /// Gaps are ordinary chunks; they are never dropped.
    Gap(Range<usize>),
}

impl SpanRef {
    /// The byte range of the span.
    pub fn range(&self) -> Range<usize> {
        match self {
            SpanRef::Word(range) | SpanRef::Special(range) | SpanRef::Gap(range) => range.clone(),
        }
    }
}

fn offset_range(
    range: Range<usize>,
    offset: usize,
) -> Range<usize> {
    range.start + offset..range.end + offset
}

/// Word Split + Special Words Segmentor
///
/// Without a word pattern, every run of text between special words is a
/// single chunk.
#[derive(Debug, Clone, Default)]
pub struct TextSegmentor {
    /// Regex for splitting words.
    word_re: Option<RegexWrapper>,

    /// Regex for matching special words.
    special_re: Option<RegexWrapper>,
}

impl TextSegmentor {
    /// Create a new text segmentor.
    ///
    /// ## Arguments
    /// * `word_re` - The regex for word splitting, if any.
    /// * `special_re` - The regex for special word matching, if any.
    pub fn init(
        word_re: Option<RegexWrapper>,
        special_re: Option<RegexWrapper>,
    ) -> Self {
        Self {
            word_re,
            special_re,
        }
    }

    /// Create a new text segmentor from a word pattern and special words.
    ///
    /// ## Arguments
    /// * `word_pattern` - The word split pattern, if any.
    /// * `specials` - A slice of special word strings.
    pub fn from_patterns<S: AsRef<str>>(
        word_pattern: Option<&RegexWrapperPattern>,
        specials: &[S],
    ) -> TTResult<Self> {
        let word_re = word_pattern.map(|p| p.compile()).transpose()?;
        Ok(Self::init(word_re, Self::compile_specials(specials)?))
    }

    /// Compile a special word matcher; `None` for no words.
    pub fn compile_specials<S: AsRef<str>>(specials: &[S]) -> TTResult<Option<RegexWrapper>> {
        if specials.is_empty() {
            return Ok(None);
        }
        Ok(Some(exact_match_union_regex_pattern(specials).compile()?))
    }

    /// Replace the special words.
    pub fn with_specials<S: AsRef<str>>(
        self,
        specials: &[S],
    ) -> TTResult<Self> {
        Ok(Self {
            special_re: Self::compile_specials(specials)?,
            ..self
        })
    }

    /// Split text into ordinary chunks, ignoring special words.
    ///
    /// The chunks concatenate to `text`. The iterator is lazy; calling
    /// this again restarts the scan.
    pub fn split<'r, 'h>(
        &'r self,
        text: &'h str,
    ) -> impl Iterator<Item = &'h str> + use<'r, 'h> {
        WordSplit::new(self.word_re.as_ref(), text, 0).map(move |span| &text[span.range()])
    }

    /// Iterate over the [`SpanRef`]s of `text`, matching all special words.
    pub fn spans<'r, 'h>(
        &'r self,
        text: &'h str,
    ) -> Segments<'r, 'h> {
        self.spans_with(text, self.special_re.as_ref())
    }

    /// Iterate over the [`SpanRef`]s of `text`, with an explicit special matcher.
    ///
    /// ## Arguments
    /// * `text` - The text to segment.
    /// * `special_re` - The special word matcher to use in place of the configured one.
    pub fn spans_with<'r, 'h>(
        &'r self,
        text: &'h str,
        special_re: Option<&'r RegexWrapper>,
    ) -> Segments<'r, 'h> {
        Segments {
            text,
            word_re: self.word_re.as_ref(),
            special_re,
            cursor: 0,
            words: None,
            pending_special: None,
        }
    }

    /// Split text into a vector of [`SpanRef`]s.
    pub fn split_spans(
        &self,
        text: &str,
    ) -> Vec<SpanRef> {
        self.spans(text).collect()
    }

    /// Find the first special word in the text.
    ///
    /// ## Returns
    /// * `Some(Range<usize>)` if a special span is found,
    /// * `None` otherwise.
    pub fn find_special(
        &self,
        text: &str,
    ) -> Option<Range<usize>> {
        self.special_re
            .as_ref()
            .and_then(|re| first_match(re, text))
    }
}

fn first_match(
    re: &RegexWrapper,
    text: &str,
) -> Option<Range<usize>> {
    match re.find_iter(text).next() {
        Some(Ok(range)) if !range.is_empty() => Some(range),
        Some(Err(err)) => {
            log::warn!("special word scan failed, treating text as ordinary: {err}");
            None
        }
        _ => None,
    }
}

/// Lazy word splitter over a single stretch of text.
struct WordSplit<'r, 'h> {
    text: &'h str,
    offset: usize,
    last: usize,
    matches: Option<MatchesWrapper<'r, 'h>>,
    pending: Option<Range<usize>>,
    done: bool,
}

impl<'r, 'h> WordSplit<'r, 'h> {
    fn new(
        word_re: Option<&'r RegexWrapper>,
        text: &'h str,
        offset: usize,
    ) -> Self {
        Self {
            text,
            offset,
            last: 0,
            matches: word_re.map(|re| re.find_iter(text)),
            pending: None,
            done: text.is_empty(),
        }
    }

    fn tail(&mut self) -> Option<SpanRef> {
        self.done = true;
        let end = self.text.len();
        if self.last < end {
            let range = self.last..end;
            self.last = end;
            Some(SpanRef::Gap(offset_range(range, self.offset)))
        } else {
            None
        }
    }
}

impl Iterator for WordSplit<'_, '_> {
    type Item = SpanRef;

    fn next(&mut self) -> Option<SpanRef> {
        if let Some(range) = self.pending.take() {
            self.last = range.end;
            return Some(SpanRef::Word(offset_range(range, self.offset)));
        }
        if self.done {
            return None;
        }

        let Some(matches) = self.matches.as_mut() else {
            self.done = true;
            return Some(SpanRef::Word(offset_range(0..self.text.len(), self.offset)));
        };

        loop {
            match matches.next() {
                Some(Ok(range)) if range.is_empty() => continue,
                Some(Ok(range)) => {
                    if self.last < range.start {
                        let gap = self.last..range.start;
                        self.last = range.start;
                        self.pending = Some(range);
                        return Some(SpanRef::Gap(offset_range(gap, self.offset)));
                    }
                    self.last = range.end;
                    return Some(SpanRef::Word(offset_range(range, self.offset)));
                }
                Some(Err(err)) => {
                    log::warn!("word split failed, keeping the remainder as one chunk: {err}");
                    return self.tail();
                }
                None => return self.tail(),
            }
        }
    }
}

/// Lazy [`SpanRef`] iterator; see [`TextSegmentor::spans`].
pub struct Segments<'r, 'h> {
    text: &'h str,
    word_re: Option<&'r RegexWrapper>,
    special_re: Option<&'r RegexWrapper>,
    cursor: usize,
    words: Option<WordSplit<'r, 'h>>,
    pending_special: Option<Range<usize>>,
}

impl Iterator for Segments<'_, '_> {
    type Item = SpanRef;

    fn next(&mut self) -> Option<SpanRef> {
        loop {
            if let Some(words) = self.words.as_mut() {
                if let Some(span) = words.next() {
                    return Some(span);
                }
                self.words = None;
                if let Some(range) = self.pending_special.take() {
                    return Some(SpanRef::Special(range));
                }
            }

            let text = self.text;
            if self.cursor >= text.len() {
                return None;
            }
            let offset = self.cursor;
            let rest = &text[offset..];

            match self.special_re.and_then(|re| first_match(re, rest)) {
                Some(hit) => {
                    self.words = Some(WordSplit::new(self.word_re, &rest[..hit.start], offset));
                    self.pending_special = Some(offset_range(hit.clone(), offset));
                    self.cursor = offset + hit.end;
                }
                None => {
                    self.words = Some(WordSplit::new(self.word_re, rest, offset));
                    self.cursor = text.len();
                }
            }
        }
    }
}
