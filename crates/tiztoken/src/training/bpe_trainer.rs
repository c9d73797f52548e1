//! # Vocab Trainer

use core::cmp::{Ordering, Reverse};

use compact_str::CompactString;
use dary_heap::OctonaryHeap;

use crate::{
    errors::TTResult,
    regex::RegexWrapperPattern,
    segmentation::TextSegmentor,
    training::{
        CountType,
        StringChunkType,
        utility::{PairIndexMap, PairSpanIndex, TextSpanCounter, TokenSpanBuf},
    },
    types::{Pair, TTHashMap, TTHashSet, TokenType},
    vocab::{
        MergeTable,
        utility::{
            strings::render_token,
            validators::{U8_SIZE, try_vocab_size},
        },
    },
};

/// Options for [`BinaryPairVocabTrainer`].
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryPairVocabTrainerOptions {
    /// The regex pattern used for text splitting; `None` trains on whole samples.
    pub pattern: Option<RegexWrapperPattern>,

    /// The vocab size.
    pub vocab_size: usize,
}

impl BinaryPairVocabTrainerOptions {
    /// Create new options, without a split pattern.
    ///
    /// ## Arguments
    /// * `vocab_size` - The target vocabulary size.
    ///
    /// ## Returns
    /// A new `BinaryPairVocabTrainerOptions` instance.
    pub fn new(vocab_size: usize) -> Self {
        Self {
            pattern: None,
            vocab_size,
        }
    }

    /// Sets the vocab size.
    ///
    /// ## Arguments
    /// * `vocab_size` - The desired vocabulary size; must be > 256 (the size of the u8 space).
    ///
    /// ## Returns
    /// The updated `BinaryPairVocabTrainerOptions` instance.
    pub fn with_vocab_size(
        self,
        vocab_size: usize,
    ) -> Self {
        Self { vocab_size, ..self }
    }

    /// Sets the regex pattern used for text splitting.
    ///
    /// The pattern is compiled by [`Self::init`].
    ///
    /// ## Arguments
    /// * `pattern` - The new word split pattern.
    ///
    /// ## Returns
    /// The updated `BinaryPairVocabTrainerOptions` instance.
    pub fn with_pattern<P: Into<RegexWrapperPattern>>(
        self,
        pattern: P,
    ) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..self
        }
    }

    /// Initializes a [`BinaryPairVocabTrainer`] from these options.
    ///
    /// ## Returns
    /// A new `BinaryPairVocabTrainer` instance, or an error if the pattern
    /// does not compile.
    pub fn init<K, C>(self) -> TTResult<BinaryPairVocabTrainer<K, C>>
    where
        K: StringChunkType,
        C: CountType,
    {
        BinaryPairVocabTrainer::new(self)
    }
}

/// Info about a [`Pair`] that could be merged.
#[derive(Debug, Eq)]
pub struct MergeJob<T: TokenType, C: CountType> {
    /// The number of instances of this pair in the corpus.
    pub count: C,

    /// The pair to merge.
    pub pair: Pair<T>,

    /// Word indices that may contain this pair.
    pub word_indices: TTHashSet<usize>,
}

impl<T: TokenType, C: CountType> MergeJob<T, C> {
    /// The job key.
    ///
    /// Max-heap by count; ties pop the lexicographically smallest pair first.
    pub fn heap_key(&self) -> (C, Reverse<Pair<T>>) {
        (self.count, Reverse(self.pair))
    }
}

impl<T: TokenType, C: CountType> PartialEq for MergeJob<T, C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.heap_key() == other.heap_key()
    }
}

impl<T: TokenType, C: CountType> PartialOrd for MergeJob<T, C> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TokenType, C: CountType> Ord for MergeJob<T, C> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.heap_key().cmp(&other.heap_key())
    }
}

/// Trainer for learning binary pair encodings.
///
/// # Parameters
/// * `K` - the type used to store strings in the word counts.
/// * `C` - the type used to store counts in the word counts.
pub struct BinaryPairVocabTrainer<K = CompactString, C = u64>
where
    K: StringChunkType,
    C: CountType,
{
    /// Trainer options.
    pub options: BinaryPairVocabTrainerOptions,

    /// The text span counter.
    pub span_counter: TextSpanCounter<K, C>,
}

impl<K, C> BinaryPairVocabTrainer<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Initializes a [`BinaryPairVocabTrainer`].
    ///
    /// ## Arguments
    /// * `options` - The trainer options.
    ///
    /// ## Returns
    /// A new `BinaryPairVocabTrainer` instance.
    pub fn new(options: BinaryPairVocabTrainerOptions) -> TTResult<Self> {
        let word_re = options.pattern.as_ref().map(|p| p.compile()).transpose()?;
        let span_counter = TextSpanCounter::<K, C>::new(TextSegmentor::init(word_re, None));

        Ok(BinaryPairVocabTrainer {
            options,
            span_counter,
        })
    }

    /// Update word counts inplace from text.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        self.span_counter.update_from_text(text);
    }

    /// Update word counts inplace from a sample iterator.
    ///
    /// ## Arguments
    /// * `samples` - An iterator over string-like samples.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, samples)))]
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.span_counter.update_from_samples(samples);
    }

    /// Trains a [`MergeTable<T>`].
    ///
    /// Each step merges the most frequent adjacent pair, ties going to the
    /// smallest ``(left, right)``. Training stops early when no pair remains.
    ///
    /// ## Returns
    /// A `Result` containing at most ``vocab_size - 256`` merges, or an error
    /// if the vocab size is invalid for `T`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn train<T>(self) -> TTResult<MergeTable<T>>
    where
        T: TokenType,
    {
        let vocab_size = try_vocab_size::<T>(self.options.vocab_size)?;

        let num_merges = vocab_size - U8_SIZE;
        log::info!("Starting BPE training: {} merges to compute", num_merges);

        let mut merges: MergeTable<T> = MergeTable::new();

        let (mut words, word_counts): (Vec<TokenSpanBuf<T>>, Vec<C>) =
            self.span_counter.to_text_span_counts_iter().unzip();

        log::info!("Building pair index over {} unique chunks...", words.len());

        let PairSpanIndex {
            mut pair_counts,
            pair_index: table_pair_index,
        } = PairSpanIndex::from_span_count_table(&words, &word_counts);

        let zero = C::zero();

        // ---- Build heap ----
        log::info!("Building heap with {} unique pairs", pair_counts.len());
        let mut heap = OctonaryHeap::with_capacity(pair_counts.len());
        for (pair, word_indices) in table_pair_index.into_iter() {
            let count = *pair_counts.get(&pair).unwrap_or(&zero);
            if count > zero {
                heap.push(MergeJob {
                    pair,
                    count,
                    word_indices,
                });
            }
        }

        // ---- Merge loop ----
        log::info!("Starting merge loop");
        let mut last_log_percent = 0;

        while merges.num_merges() < num_merges {
            let Some(mut job) = heap.pop() else {
                log::info!("No pairs left to merge");
                break;
            };

            {
                // Lazy refresh the job count; live counts only ever shrink.
                let current = *pair_counts.get(&job.pair).unwrap_or(&zero);
                if job.count != current {
                    job.count = current;
                    if job.count > zero {
                        heap.push(job);
                    }
                    continue;
                }
            }

            if job.count == zero {
                // No live matches.
                break;
            }

            let new_token = merges.push_next(job.pair)?;

            let mut new_token_pair_map: PairIndexMap<T> = TTHashMap::with_capacity(16);

            // Merge this pair in all words where it occurs
            for &word_idx in &job.word_indices {
                let weight = word_counts[word_idx];
                words[word_idx].merge_pair_cb(job.pair, new_token, &mut |pair, delta| {
                    pair_counts
                        .entry(pair)
                        .or_default()
                        .apply_pair_delta(delta, weight);
                    if delta > 0 {
                        // either a or b is new_token.
                        new_token_pair_map.entry(pair).or_default().insert(word_idx);
                    }
                });
            }

            // These all contain the new token and are not yet in the heap.
            for (pair, word_indices) in new_token_pair_map {
                let count = *pair_counts.get(&pair).unwrap_or(&zero);
                if count > zero {
                    heap.push(MergeJob {
                        pair,
                        count,
                        word_indices,
                    });
                }
            }

            let merges_done = merges.num_merges();
            log::debug!(
                "merge {}/{}: {:?} -> {} ({}) had {} occurrences",
                merges_done,
                num_merges,
                job.pair,
                new_token,
                render_token(merges.expand(new_token).unwrap_or_default()),
                job.count
            );

            // Log progress every 1%
            let current_percent = (merges_done * 100) / num_merges;
            if current_percent > last_log_percent {
                log::info!(
                    "Progress: {}% ({}/{} merges) - Last merge: {:?} -> {:?} (frequency: {})",
                    current_percent,
                    merges_done,
                    num_merges,
                    job.pair,
                    new_token,
                    job.count
                );
                last_log_percent = current_percent;
            }
        }

        log::info!(
            "Finished training: {} merges completed",
            merges.num_merges()
        );
        Ok(merges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::TiztokenError, pretrained::patterns::GPT4_SPLIT_PATTERN};

    fn train_text<T: TokenType>(
        options: BinaryPairVocabTrainerOptions,
        text: &str,
    ) -> TTResult<MergeTable<T>> {
        let mut trainer = options.init::<CompactString, u64>()?;
        trainer.update_from_text(text);
        trainer.train()
    }

    #[test]
    fn test_trainer_options() {
        let options = BinaryPairVocabTrainerOptions::new(1000);

        assert_eq!(options.vocab_size, 1000);
        assert_eq!(options.pattern, None);

        let options = options.with_vocab_size(2000).with_pattern(r"\S+");

        assert_eq!(options.vocab_size, 2000);
        assert_eq!(options.pattern, Some(r"\S+".into()));
    }

    #[test]
    fn test_trainer_options_bad_pattern() {
        let res = BinaryPairVocabTrainerOptions::new(1000)
            .with_pattern(r"(")
            .init::<String, u32>();
        assert!(matches!(res, Err(TiztokenError::Regex(_))));
    }

    #[test]
    fn test_train_basic_merges() {
        let merges: MergeTable<u32> =
            train_text(BinaryPairVocabTrainerOptions::new(259), "aaabdaaabac").unwrap();

        assert_eq!(
            merges.rules(),
            &[((97, 97), 256), ((97, 98), 257), ((256, 257), 258)]
        );
        assert_eq!(merges.expand(258), Some(b"aaab".as_slice()));
    }

    #[test]
    fn test_train_vocab_size_too_small() {
        let res = train_text::<u32>(BinaryPairVocabTrainerOptions::new(256), "aaab");
        assert!(matches!(
            res,
            Err(TiztokenError::VocabSizeTooSmall { size: 256 })
        ));

        let res = train_text::<u8>(BinaryPairVocabTrainerOptions::new(300), "aaab");
        assert!(matches!(
            res,
            Err(TiztokenError::VocabSizeOverflow { size: 300 })
        ));
    }

    #[test]
    fn test_train_stops_early() {
        let merges: MergeTable<u16> =
            train_text(BinaryPairVocabTrainerOptions::new(1000), "abc").unwrap();
        assert_eq!(merges.rules(), &[((97, 98), 256), ((256, 99), 257)]);

        let merges: MergeTable<u16> =
            train_text(BinaryPairVocabTrainerOptions::new(1000), "").unwrap();
        assert_eq!(merges.num_merges(), 0);
    }

    #[test]
    fn test_train_counts_are_weighted() {
        // "abc" is one distinct chunk seen three times.
        let options = BinaryPairVocabTrainerOptions::new(258).with_pattern(r"\w+");
        let merges: MergeTable<u16> = train_text(options, "abc abc abc bcx").unwrap();

        let (a, b, c) = (b'a' as u16, b'b' as u16, b'c' as u16);
        assert_eq!(merges.rules(), &[((b, c), 256), ((a, 256), 257)]);
    }

    #[test]
    fn test_train_respects_chunks() {
        let options = BinaryPairVocabTrainerOptions::new(300).with_pattern(GPT4_SPLIT_PATTERN);
        let merges: MergeTable<u32> = train_text(options, "ab ab ab!! ab?").unwrap();

        for &(pair, token) in merges.rules() {
            let span = merges.expand(token).unwrap();
            assert!(
                !(span.contains(&b'b') && span.contains(&b'!')),
                "merge {pair:?} crossed a chunk boundary"
            );
        }
    }

    #[test]
    fn test_train_deterministic() {
        let text = "the cat sat on the mat; the rat sat on the hat";
        let options = BinaryPairVocabTrainerOptions::new(280).with_pattern(GPT4_SPLIT_PATTERN);

        let a: MergeTable<u32> = train_text(options.clone(), text).unwrap();
        let b: MergeTable<u32> = train_text(options, text).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_merge_job_heap_key() {
        type T = u32;
        type C = u32;

        let job1: MergeJob<T, C> = MergeJob {
            pair: (1, 2),
            count: 2,
            word_indices: Default::default(),
        };
        let job2 = MergeJob {
            pair: (2, 1),
            count: 1,
            word_indices: Default::default(),
        };
        let job3 = MergeJob {
            pair: (2, 2),
            count: 1,
            word_indices: Default::default(),
        };

        assert_eq!(&job1, &job1);
        assert_ne!(&job1, &job2);

        assert_eq!(job1.heap_key(), (2, Reverse((1, 2))));
        assert_eq!(job1.cmp(&job2), Ordering::Greater);

        // equal counts: the smaller pair wins.
        assert_eq!(job2.cmp(&job3), Ordering::Greater);
        assert_eq!(job3.partial_cmp(&job2), Some(Ordering::Less));

        let mut heap = OctonaryHeap::new();
        heap.push(job3);
        heap.push(job2);
        heap.push(job1);
        let order = core::iter::from_fn(|| heap.pop().map(|j| j.pair)).collect::<Vec<_>>();
        assert_eq!(order, vec![(1, 2), (2, 1), (2, 2)]);
    }
}
