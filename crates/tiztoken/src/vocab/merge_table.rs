//! # Merge Table
//!
//! The ordered list of learned ``(left, right) -> token`` rules, and the
//! byte expansion of every token the rules produce.

use crate::{
    errors::{TTResult, TiztokenError},
    types::{Pair, TokenType},
    vocab::{PairTokenMap, TokenSpanMap, TokenVocab, utility::validators::U8_SIZE},
};

/// Single-byte spans, indexed by byte value.
static BYTE_SPANS: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }
    table
};

/// Ordered merge rules over canonical byte tokens.
///
/// Tokens ``0..=255`` are the raw bytes. Every rule's result is strictly
/// larger than every earlier result, so the result token doubles as the
/// creation rank of the rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeTable<T: TokenType> {
    /// Rules in creation order.
    rules: Vec<(Pair<T>, T)>,

    /// ``pair => result`` lookup.
    pair_tokens: PairTokenMap<T>,

    /// ``result => bytes`` expansion of each rule.
    spans: TokenSpanMap<T>,
}

impl<T: TokenType> MergeTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of merge rules.
    pub fn num_merges(&self) -> usize {
        self.rules.len()
    }

    /// The rules, in creation order.
    pub fn rules(&self) -> &[(Pair<T>, T)] {
        &self.rules
    }

    /// The result token of the most recent rule.
    pub fn last_token(&self) -> Option<T> {
        self.rules.last().map(|&(_, t)| t)
    }

    /// The next dense token id: ``256 + num_merges``.
    pub fn next_dense_token(&self) -> TTResult<T> {
        T::from_usize(U8_SIZE + self.rules.len()).ok_or(TiztokenError::TokenOutOfRange)
    }

    /// Are the result tokens exactly ``256, 257, ...`` in order?
    pub fn is_dense(&self) -> bool {
        self.rules
            .iter()
            .enumerate()
            .all(|(idx, &(_, t))| t.to_usize() == Some(U8_SIZE + idx))
    }

    /// Does the table know this token (as a byte or a rule result)?
    pub fn contains_token(
        &self,
        token: T,
    ) -> bool {
        Self::byte_of(token).is_some() || self.spans.contains_key(&token)
    }

    /// Look up the result token for a pair.
    #[inline(always)]
    pub fn lookup_pair(
        &self,
        pair: &Pair<T>,
    ) -> Option<T> {
        self.pair_tokens.get(pair).copied()
    }

    /// Look up the rule which produced a token.
    pub fn lookup_parents(
        &self,
        token: T,
    ) -> Option<Pair<T>> {
        let first = self.rules.first()?.1;
        let idx = token.checked_sub(&first)?.to_usize()?;
        // dense tables index directly; otherwise search by rank.
        match self.rules.get(idx) {
            Some(&(pair, t)) if t == token => Some(pair),
            _ => self
                .rules
                .binary_search_by_key(&token, |&(_, t)| t)
                .ok()
                .map(|i| self.rules[i].0),
        }
    }

    /// Get the byte expansion of a token.
    #[inline(always)]
    pub fn expand(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        match Self::byte_of(token) {
            Some(b) => Some(&BYTE_SPANS[b..=b]),
            None => self.spans.get(&token).map(|v| v.as_slice()),
        }
    }

    /// Append a rule with an explicit result token.
    ///
    /// ## Errors
    /// * both parents must already exist;
    /// * the pair must not already have a rule;
    /// * the result must be above the byte range and above every earlier result.
    pub fn push(
        &mut self,
        pair: Pair<T>,
        token: T,
    ) -> TTResult<()> {
        let (a, b) = pair;
        let span = match (self.expand(a), self.expand(b)) {
            (Some(sa), Some(sb)) => [sa, sb].concat(),
            _ => {
                return Err(TiztokenError::VocabConflict(format!(
                    "merge ({a}, {b}) references an unknown token"
                )));
            }
        };

        if self.pair_tokens.contains_key(&pair) {
            return Err(TiztokenError::VocabConflict(format!(
                "merge ({a}, {b}) is already defined"
            )));
        }

        let floor = match self.last_token() {
            Some(last) => last.to_usize().map(|v| v + 1),
            None => Some(U8_SIZE),
        };
        if token.to_usize() < floor {
            return Err(TiztokenError::VocabConflict(format!(
                "merge result {token} is not above the previous results"
            )));
        }

        self.rules.push((pair, token));
        self.pair_tokens.insert(pair, token);
        self.spans.insert(token, span);
        Ok(())
    }

    /// Append a rule with the next dense result token.
    ///
    /// ## Returns
    /// The new token.
    pub fn push_next(
        &mut self,
        pair: Pair<T>,
    ) -> TTResult<T> {
        let token = self.next_dense_token()?;
        self.push(pair, token)?;
        Ok(token)
    }

    /// Build a table from rules, validating each in order.
    pub fn try_from_rules<I>(rules: I) -> TTResult<Self>
    where
        I: IntoIterator<Item = (Pair<T>, T)>,
    {
        let mut table = Self::new();
        for (pair, token) in rules {
            table.push(pair, token)?;
        }
        Ok(table)
    }

    fn byte_of(token: T) -> Option<usize> {
        token.to_usize().filter(|&b| b < U8_SIZE)
    }
}

impl<T: TokenType> TokenVocab<T> for MergeTable<T> {
    fn tokens(&self) -> Vec<T> {
        (0..U8_SIZE)
            .filter_map(T::from_usize)
            .chain(self.rules.iter().map(|&(_, t)| t))
            .collect()
    }

    fn len(&self) -> usize {
        U8_SIZE + self.rules.len()
    }

    fn max_token(&self) -> Option<T> {
        self.last_token().or_else(|| T::from_usize(U8_SIZE - 1))
    }

    fn span_pairs(&self) -> impl Iterator<Item = (Vec<u8>, T)> {
        self.tokens().into_iter().filter_map(|t| {
            self.expand(t).map(|span| (span.to_vec(), t))
        })
    }
}
