use std::path::Path;

use tiztoken::{AllowedSpecial, BpeTokenizer, Gpt4Tokenizer, TTResult, Tokenizer};

/// Model selection argument group.
#[derive(clap::Args, Debug)]
pub struct ModelSelectorArgs {
    /// A saved ``.model`` file, or a ``.tiktoken`` reference vocabulary.
    #[arg(long)]
    model: String,
}

/// A tokenizer loaded from disk.
pub enum LoadedTokenizer {
    /// A trained model.
    Trained(BpeTokenizer<u32>),

    /// The GPT-4 reference tokenizer.
    Reference(Gpt4Tokenizer<u32>),
}

impl ModelSelectorArgs {
    /// Load the selected tokenizer.
    pub fn load_tokenizer(&self) -> Result<LoadedTokenizer, Box<dyn std::error::Error>> {
        let path = Path::new(&self.model);
        log::info!("loading model: {}", path.display());

        Ok(match path.extension().and_then(|e| e.to_str()) {
            Some("tiktoken") => LoadedTokenizer::Reference(Gpt4Tokenizer::load_tiktoken_path(path)?),
            _ => LoadedTokenizer::Trained(BpeTokenizer::from_model_path(path)?),
        })
    }
}

impl LoadedTokenizer {
    /// Encode one chunk of text.
    pub fn try_encode(
        &self,
        text: &str,
        allowed: &AllowedSpecial,
    ) -> TTResult<Vec<u32>> {
        match self {
            Self::Trained(tok) => tok.try_encode(text, allowed),
            Self::Reference(tok) => tok.try_encode(text, allowed),
        }
    }

    /// Decode one sequence of tokens.
    pub fn decode(
        &self,
        tokens: &[u32],
    ) -> TTResult<String> {
        match self {
            Self::Trained(tok) => tok.decode(tokens),
            Self::Reference(tok) => tok.decode(tokens),
        }
    }
}
