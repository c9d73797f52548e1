use std::io::{BufRead, Write};

use tiztoken::AllowedSpecial;

use crate::{
    input_output::{InputArgs, OutputArgs, write_token_line},
    logging::LogArgs,
    model_selector::ModelSelectorArgs,
};

/// Special word handling for the encode command.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SpecialMode {
    /// Match every registered special word.
    All,

    /// Encode special words as ordinary text.
    None,

    /// Fail if any registered special word occurs.
    NoneRaise,
}

impl From<SpecialMode> for AllowedSpecial {
    fn from(mode: SpecialMode) -> Self {
        match mode {
            SpecialMode::All => AllowedSpecial::All,
            SpecialMode::None => AllowedSpecial::None,
            SpecialMode::NoneRaise => AllowedSpecial::NoneRaise,
        }
    }
}

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    model_selector: ModelSelectorArgs,

    /// Special word handling.
    #[arg(long, value_enum, default_value = "none")]
    specials: SpecialMode,

    /// Only allow these special words; overrides ``--specials``.
    #[arg(long)]
    allow: Vec<String>,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl EncodeArgs {
    /// Run the encode command.
    ///
    /// Each input line, end-of-line included, becomes one line of tokens.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = self.model_selector.load_tokenizer()?;
        let allowed = if self.allow.is_empty() {
            self.specials.into()
        } else {
            AllowedSpecial::set(self.allow.iter().cloned())
        };

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            let tokens = tokenizer.try_encode(&line, &allowed)?;

            write_token_line(&mut writer, &tokens)?;
            writer.flush()?;
            line.clear();
        }
        Ok(())
    }
}
