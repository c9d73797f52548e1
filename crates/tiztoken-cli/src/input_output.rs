//! Line-oriented text and token-id streams for the encode and decode commands.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    num::ParseIntError,
    path::PathBuf,
};

/// The file behind a ``--input``/``--output`` flag; `None` means the standard stream.
fn file_path(path: &Option<PathBuf>) -> Option<&PathBuf> {
    path.as_ref().filter(|p| p.as_os_str() != "-")
}

/// Input argument group.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// File to read text or token lines from; stdin when absent or "-".
    #[arg(long)]
    pub input: Option<PathBuf>,
}

impl InputArgs {
    /// Open a line reader for the input.
    pub fn open_reader(&self) -> io::Result<Box<dyn BufRead>> {
        Ok(match file_path(&self.input) {
            Some(p) => Box::new(BufReader::new(File::open(p)?)),
            None => Box::new(io::stdin().lock()),
        })
    }
}

/// Output argument group.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// File to write results to; stdout when absent or "-".
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    /// Open a buffered writer for the output.
    pub fn open_writer(&self) -> io::Result<Box<dyn Write>> {
        Ok(match file_path(&self.output) {
            Some(p) => Box::new(BufWriter::new(File::create(p)?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        })
    }
}

/// Write one line of space-separated token ids.
pub fn write_token_line<W: Write + ?Sized>(
    writer: &mut W,
    tokens: &[u32],
) -> io::Result<()> {
    let mut sep = "";
    for token in tokens {
        write!(writer, "{sep}{token}")?;
        sep = " ";
    }
    writeln!(writer)
}

/// Parse one line of whitespace-separated token ids.
pub fn parse_token_line(line: &str) -> Result<Vec<u32>, ParseIntError> {
    line.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_stream_paths() {
        assert_eq!(file_path(&None), None);
        assert_eq!(file_path(&Some("-".into())), None);
        assert_eq!(
            file_path(&Some("tok.txt".into())),
            Some(&PathBuf::from("tok.txt"))
        );
    }

    #[test]
    fn test_token_lines() {
        let mut buf = Vec::new();
        write_token_line(&mut buf, &[1, 22, 333]).unwrap();
        write_token_line(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1 22 333\n\n");

        assert_eq!(parse_token_line(" 1 22\t333 ").unwrap(), vec![1, 22, 333]);
        assert!(parse_token_line("").unwrap().is_empty());
        assert!(parse_token_line("1 x").is_err());
    }
}
