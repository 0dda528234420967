use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use audiogroup::process::read::Reader;
use indicatif::MultiProgress;

use super::command::Cli;
use super::list::cmd_list;
use super::progress::{create_progress_bar, print_line};
use crate::input::InputReader;
use crate::output::{Manifest, dump_file_name, input_base_name, write_track};
use crate::timestamp::elapsed_str;

#[derive(Debug, Default, PartialEq)]
pub struct ExtractSummary {
    pub written: usize,
    pub skipped: usize,
    pub bytes: u64,
}

pub fn cmd_extract(cli: &Cli, multi: Option<&MultiProgress>) -> Result<ExtractSummary> {
    let start_time = Instant::now();

    let input = InputReader::new(&cli.input)?;
    if input.is_pipe() {
        log::debug!("Reading container from stdin");
    }

    let mut reader = Reader::new(input).context("error reading")?;

    println!(
        "Found {} tracks in {:?}",
        reader.len(),
        cli.input.display().to_string()
    );

    if cli.list {
        cmd_list(&reader);
        return Ok(ExtractSummary::default());
    }

    let output_dir = cli.output_path.clone().unwrap_or_else(|| PathBuf::from("."));
    if cli.output_path.is_some() {
        log::info!("Output path specified: {}", output_dir.display());
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("could not create {:?}", output_dir.display().to_string())
        })?;
    }

    let base_name = input_base_name(&cli.input);
    let mut manifest = Manifest::new(&cli.input, reader.header(), reader.len());
    let descriptors = reader.tracks().to_vec();

    let pb = match multi {
        Some(multi) => Some(create_progress_bar(multi, descriptors.len() as u64)?),
        None => None,
    };

    let mut summary = ExtractSummary::default();

    for result in reader.extract() {
        let track = match result {
            Ok(track) => track,
            Err(e) if e.is_recoverable() && !cli.strict => {
                log::warn!("{e}");
                manifest.push_skipped(e.index(), &e);
                summary.skipped += 1;
                if let Some(ref pb) = pb {
                    pb.inc(1);
                }
                continue;
            }
            Err(e) => {
                if let Some(pb) = pb {
                    pb.finish_with_message("extraction failed");
                }
                let context = if e.is_recoverable() {
                    "skipped track is fatal in strict mode".to_string()
                } else {
                    format!(
                        "could not read source file {:?}",
                        cli.input.display().to_string()
                    )
                };
                return Err(e).context(context);
            }
        };

        let file_name = dump_file_name(&base_name, track.index, track.offset, track.extension());
        let path = output_dir.join(&file_name);
        let written = write_track(&path, &track)?;

        print_line(
            pb.as_ref(),
            &format!(
                "Wrote #{:03} {:?} offset:{} size:{} bytes",
                track.index + 1,
                file_name,
                track.offset,
                written
            ),
        );

        manifest.push_written(&descriptors[track.index], &track, path);
        summary.written += 1;
        summary.bytes += written as u64;

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message(format!(
            "{} written, {} skipped",
            summary.written, summary.skipped
        ));
    }

    println!();
    println!("Took {}", elapsed_str(start_time.elapsed()));
    println!();
    println!(
        "Use `file`, `ffprobe` or other such tool to determine the correct file extension(s) for dump-*.dat files"
    );

    if let Some(ref manifest_path) = cli.manifest {
        manifest.write(manifest_path)?;
    }

    log::info!(
        "Extraction completed: {} tracks written ({} bytes), {} skipped",
        summary.written,
        summary.bytes,
        summary.skipped
    );

    Ok(summary)
}
