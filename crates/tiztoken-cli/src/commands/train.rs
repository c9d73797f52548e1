use std::{fs, num::TryFromIntError, time::Instant};

use tiztoken::{BpeTokenizer, Tokenizer};

use crate::logging::LogArgs;

/// Pre-tokenizer choices for training.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Splitter {
    /// No splitting; merges may cross any boundary.
    Basic,

    /// The GPT-2 split pattern.
    Gpt2,

    /// The GPT-4 split pattern.
    Gpt4,
}

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    /// Input text files.
    #[arg(required = true)]
    files: Vec<String>,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Final vocab size, counting the 256 byte tokens.
    #[arg(long, default_value = "512")]
    vocab_size: usize,

    /// Text splitting strategy.
    #[arg(long, value_enum, default_value = "gpt4")]
    splitter: Splitter,

    /// Special words to register after training, numbered from the vocab size up.
    #[arg(long)]
    special: Vec<String>,

    /// Output prefix; writes ``{prefix}.model`` and ``{prefix}.vocab``.
    #[arg(long)]
    output: String,
}

impl TrainArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let mut tokenizer: BpeTokenizer<u32> = match self.splitter {
            Splitter::Basic => BpeTokenizer::basic()?,
            Splitter::Gpt2 => BpeTokenizer::gpt2()?,
            Splitter::Gpt4 => BpeTokenizer::gpt4()?,
        };

        log::info!("Reading files:");
        let mut samples = Vec::with_capacity(self.files.len());
        for (idx, path) in self.files.iter().enumerate() {
            log::info!("{idx}: {path}");
            samples.push(fs::read_to_string(path)?);
        }

        log::info!("Training {:?} tokenizer...", self.splitter);
        let start = Instant::now();
        tokenizer.train_samples(samples.iter().map(String::as_str), self.vocab_size)?;
        log::info!("Training took {:.2?}", start.elapsed());

        if !self.special.is_empty() {
            let specials = assign_special_ids(&self.special, tokenizer.vocab_size())?;
            tokenizer.register_special_tokens(&specials)?;
        }

        log::info!("Vocabulary Size: {}", tokenizer.vocab_size());

        let path = tokenizer.save(&self.output)?;
        log::info!("output: {}", path.display());

        Ok(())
    }
}

/// Assign consecutive ids to `words`, starting at `first`.
fn assign_special_ids(
    words: &[String],
    first: usize,
) -> Result<Vec<(&str, u32)>, TryFromIntError> {
    words
        .iter()
        .enumerate()
        .map(|(idx, word)| Ok((word.as_str(), u32::try_from(first + idx)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_special_ids() {
        let words = vec!["<|a|>".to_string(), "<|b|>".to_string()];
        assert_eq!(
            assign_special_ids(&words, 512).unwrap(),
            vec![("<|a|>", 512), ("<|b|>", 513)]
        );
        assert!(assign_special_ids(&[], 7).unwrap().is_empty());

        let last = u32::MAX as usize;
        assert_eq!(
            assign_special_ids(&words[..1], last).unwrap(),
            vec![("<|a|>", u32::MAX)]
        );
        assert!(assign_special_ids(&words, last).is_err());
    }
}
