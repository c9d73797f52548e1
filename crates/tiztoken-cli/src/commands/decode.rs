use std::io::{BufRead, Write};

use crate::{
    input_output::{InputArgs, OutputArgs, parse_token_line},
    logging::LogArgs,
    model_selector::ModelSelectorArgs,
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    model_selector: ModelSelectorArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl DecodeArgs {
    /// Run the decode command.
    ///
    /// Each input line holds whitespace-separated token ids.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = self.model_selector.load_tokenizer()?;
        let reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        for line in reader.lines() {
            let tokens = parse_token_line(&line?)?;
            write!(writer, "{}", tokenizer.decode(&tokens)?)?;
            writer.flush()?;
        }
        Ok(())
    }
}
