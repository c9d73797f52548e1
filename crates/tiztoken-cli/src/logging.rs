use stderrlog::{LogLevelNum, Timestamp};

/// Logging setup arg group.
///
/// Only records from the `tiztoken` library and this binary are shown.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[arg(short, long)]
    pub quiet: bool,

    /// Raise the log level (-v info, -vv debug with per-merge detail, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Prefix log lines with timestamps.
    #[arg(long)]
    pub ts: bool,
}

/// Map a level number onto stderrlog's levels; 0 is off.
fn log_level(level: u8) -> LogLevelNum {
    match level {
        0 => LogLevelNum::Off,
        1 => LogLevelNum::Error,
        2 => LogLevelNum::Warn,
        3 => LogLevelNum::Info,
        4 => LogLevelNum::Debug,
        _ => LogLevelNum::Trace,
    }
}

impl LogArgs {
    /// The effective level number for a command whose quiet level is `default`.
    ///
    /// Each `-v` counts up from warn, or from `default` if it is higher.
    fn level(
        &self,
        default: u8,
    ) -> u8 {
        match self.verbose {
            0 => default,
            v => default.max(2).saturating_add(v),
        }
    }

    /// Install the stderr logger.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        stderrlog::new()
            .module("tiztoken")
            .quiet(self.quiet)
            .verbosity(log_level(self.level(default)))
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}
