use anyhow::Result;
use clap::Parser as ClapParser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

use cli::command::{Cli, LogFormat};
use cli::extract::cmd_extract;

mod cli;
mod input;
mod output;
pub(crate) mod timestamp;

/// One log record as a single-line JSON object.
fn json_record(
    ts: impl std::fmt::Display,
    level: log::Level,
    msg: &std::fmt::Arguments<'_>,
) -> serde_json::Value {
    serde_json::json!({
        "ts": ts.to_string(),
        "lvl": level.to_string(),
        "msg": msg.to_string(),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let base_level = cli.loglevel.to_level_filter();

    let multi = MultiProgress::new();

    let mut env_builder = env_logger::Builder::from_default_env();
    env_builder.filter_level(base_level);
    match cli.log_format {
        LogFormat::Plain => {
            env_builder.format_timestamp_secs();
        }
        LogFormat::Json => {
            env_builder.format(|buf, record| {
                use std::io::Write;
                writeln!(
                    buf,
                    "{}",
                    json_record(buf.timestamp(), record.level(), record.args())
                )
            });
        }
    }

    let pb = if cli.progress && !cli.list {
        let logger = env_builder.build();
        LogWrapper::new(multi.clone(), logger).try_init()?;
        Some(&multi)
    } else {
        env_builder.try_init()?;
        None
    };

    log::debug!(
        "{} {} ({}), audiogroup {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown"),
        env!("AUDIOGROUP_VERSION")
    );

    cmd_extract(&cli, pb)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_record_is_valid_json() -> Result<()> {
        let line = json_record(
            "2026-10-19T12:00:00Z",
            log::Level::Warn,
            &format_args!("could not stat file \"/tmp/café.dat\": it's missing\n"),
        )
        .to_string();

        assert!(!line.contains('\n'), "{line}");

        let parsed: serde_json::Value = serde_json::from_str(&line)?;
        assert_eq!(parsed["ts"], "2026-10-19T12:00:00Z");
        assert_eq!(parsed["lvl"], "WARN");
        assert_eq!(
            parsed["msg"],
            "could not stat file \"/tmp/café.dat\": it's missing\n"
        );
        Ok(())
    }
}
