//! # Token Span Buffer

use crate::types::{Pair, TokenType, byte_token};

/// A mutable span of tokens (a chunk or "word").
///
/// Iteratively rewritten during BPE vocabulary training.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenSpanBuf<T: TokenType> {
    tokens: Vec<T>,
}

impl<T: TokenType, S: AsRef<[T]>> From<S> for TokenSpanBuf<T> {
    fn from(tokens: S) -> Self {
        Self::from_tokens(tokens)
    }
}

impl<T: TokenType> TokenSpanBuf<T> {
    const DEC: i32 = -1;
    const INC: i32 = 1;

    /// Create a new span buffer from tokens.
    pub fn from_tokens<S>(tokens: S) -> Self
    where
        S: AsRef<[T]>,
    {
        Self {
            tokens: tokens.as_ref().to_vec(),
        }
    }

    /// Create a new span buf of canonical byte tokens.
    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B) -> Self {
        Self {
            tokens: bytes.as_ref().iter().map(|&b| byte_token(b)).collect(),
        }
    }

    /// Create a new span buf from the UTF-8 bytes of a string.
    pub fn from_string<S: AsRef<str>>(text: S) -> Self {
        Self::from_bytes(text.as_ref().as_bytes())
    }

    /// View the tokens as a slice.
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is this span empty?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get an iterator over [`Pair<T>`] windows of this span.
    pub fn pairs(&self) -> impl Iterator<Item = Pair<T>> + '_ {
        self.tokens.windows(2).map(|w| (w[0], w[1]))
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`, left to right.
    ///
    /// # Arguments
    /// * `pair` - the pair to merge.
    /// * `replacement` - the token to replace `pair` with.
    /// * `on_merge` - a callback function to invoke for each incremental pair delta.
    ///   The function is called with:
    ///   - `pair` - the affected pair.
    ///   - `delta` - the pair count delta: `+1` for an added pair, `-1` for a removed pair.
    pub fn merge_pair_cb<F>(
        &mut self,
        pair: Pair<T>,
        replacement: T,
        on_merge: &mut F,
    ) where
        F: FnMut(Pair<T>, i32),
    {
        let (a, b) = pair;
        let n = self.tokens.len();

        if n < 2 {
            return;
        }

        let mut new_tokens: Vec<T> = Vec::with_capacity(n);

        let mut i = 0;
        while i < n {
            let current = self.tokens[i];

            if i + 1 < n && pair == (current, self.tokens[i + 1]) {
                // Remove Previous Pair?
                if let Some(&x) = new_tokens.last() {
                    on_merge((x, a), Self::DEC);
                    on_merge((x, replacement), Self::INC);
                }

                // Remove Current Pair.
                on_merge(pair, Self::DEC);

                // Remove Next Pair?
                if i + 2 < n {
                    let y = self.tokens[i + 2];
                    on_merge((b, y), Self::DEC);
                    on_merge((replacement, y), Self::INC);
                };

                new_tokens.push(replacement);

                // Skip 'a' and 'b'.
                i += 2;
            } else {
                new_tokens.push(current);
                i += 1;
            }
        }

        self.tokens = new_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TTHashMap;

    #[test]
    fn test_span_from_str() {
        let span: TokenSpanBuf<u32> = TokenSpanBuf::from_string("hello");
        assert_eq!(span.tokens(), &[104, 101, 108, 108, 111]);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());

        let span: TokenSpanBuf<u16> = [1, 2, 3].into();
        assert_eq!(span.pairs().collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_span_merge_pair() {
        let mut span: TokenSpanBuf<u32> = TokenSpanBuf::from_tokens(vec![1, 2, 3, 1, 2, 2, 1]);

        let mut deltas: Vec<(Pair<u32>, i32)> = Vec::new();
        span.merge_pair_cb((1, 2), 9, &mut |p, d| deltas.push((p, d)));
        assert_eq!(span.tokens(), &[9, 3, 9, 2, 1]);

        assert_eq!(
            deltas,
            vec![
                // first match
                ((1, 2), -1),
                ((2, 3), -1),
                ((9, 3), 1),
                // second match
                ((3, 1), -1),
                ((3, 9), 1),
                ((1, 2), -1),
                ((2, 2), -1),
                ((9, 2), 1),
            ]
        );
    }

    #[test]
    fn test_overlapping_runs() {
        fn net_deltas(
            tokens: Vec<u32>,
            pair: Pair<u32>,
        ) -> (Vec<u32>, TTHashMap<Pair<u32>, i32>) {
            let mut span = TokenSpanBuf::from_tokens(tokens);
            let mut net: TTHashMap<Pair<u32>, i32> = TTHashMap::default();
            span.merge_pair_cb(pair, 9, &mut |p, d| *net.entry(p).or_default() += d);
            net.retain(|_, d| *d != 0);
            (span.tokens().to_vec(), net)
        }

        // "aaa" merges left to right; the trailing 'a' survives.
        let (tokens, net) = net_deltas(vec![1, 1, 1], (1, 1));
        assert_eq!(tokens, vec![9, 1]);
        assert_eq!(net.get(&(1, 1)), Some(&-2));
        assert_eq!(net.get(&(9, 1)), Some(&1));
        assert_eq!(net.len(), 2);

        let (tokens, net) = net_deltas(vec![1, 1, 1, 1], (1, 1));
        assert_eq!(tokens, vec![9, 9]);
        assert_eq!(net.get(&(1, 1)), Some(&-3));
        assert_eq!(net.get(&(9, 9)), Some(&1));
        assert_eq!(net.len(), 2);
    }
}
