mod decode;
mod encode;
mod train;

/// Subcommands for tiztoken
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Train a new model.
    Train(train::TrainArgs),

    /// Encode text to tokens, one line at a time.
    Encode(encode::EncodeArgs),

    /// Decode lines of tokens back to text.
    Decode(decode::DecodeArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
        }
    }
}
