use std::path::PathBuf;

use clap::{Parser as ClapParser, ValueEnum};

#[derive(Debug, ClapParser)]
#[command(
    name         = env!("CARGO_PKG_NAME"),
    version      = env!("CARGO_PKG_VERSION"),
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        "\naudiogroup ", env!("AUDIOGROUP_VERSION"),
        "\nbuilt ", env!("BUILD_TIMESTAMP"),
    ),
    author       = env!("CARGO_PKG_AUTHORS"),
    about        = "Dump the embedded tracks of an audiogroup container",
    long_about   = None,
    after_help   = "Example:\n  audiogroupd audiogroup1.dat",
)]
pub struct Cli {
    /// Input audiogroup container (use "-" for stdin).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Directory for the dumped tracks.
    #[arg(long, value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Only print the track table, write nothing.
    #[arg(long)]
    pub list: bool,

    /// Write a YAML summary of the extraction to this file.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Set the log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub loglevel: LogLevel,

    /// Treat skipped tracks as fatal errors (fail on first skip).
    #[arg(long)]
    pub strict: bool,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Show a progress bar while dumping.
    #[arg(long)]
    pub progress: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Disable logging output.
    Off,
    /// No output except errors.
    Error,
    /// Show warnings and errors.
    Warn,
    /// Show info, warnings and errors (default).
    Info,
    /// Show debug, info, warnings and errors.
    Debug,
    /// Show all log messages including trace.
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Colorized human-readable text.
    Plain,
    /// Structured JSON per log record.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_positional_argument() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["audiogroupd", "audiogroup1.dat"])?;

        assert_eq!(cli.input, PathBuf::from("audiogroup1.dat"));
        assert!(cli.output_path.is_none());
        assert!(!cli.list && !cli.strict && !cli.progress);
        assert_eq!(cli.loglevel.to_level_filter(), log::LevelFilter::Info);
        Ok(())
    }

    #[test]
    fn missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["audiogroupd"]).is_err());
        assert!(Cli::try_parse_from(["audiogroupd", "a.dat", "b.dat"]).is_err());
    }

    #[test]
    fn options() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "audiogroupd",
            "--output-path",
            "dumps",
            "--manifest",
            "tracks.yaml",
            "--loglevel",
            "warn",
            "--strict",
            "-",
        ])?;

        assert_eq!(cli.input, PathBuf::from("-"));
        assert_eq!(cli.output_path, Some(PathBuf::from("dumps")));
        assert_eq!(cli.manifest, Some(PathBuf::from("tracks.yaml")));
        assert_eq!(cli.loglevel.to_level_filter(), log::LevelFilter::Warn);
        assert!(cli.strict);
        Ok(())
    }
}
