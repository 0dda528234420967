use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use audiogroup::process::extract::ExtractedTrack;
use audiogroup::structs::header::RawHeader;
use audiogroup::structs::track::TrackDescriptor;
use serde::{Deserialize, Serialize};

/// Base name used in dump file names.
pub fn input_base_name(input_path: &Path) -> String {
    if input_path.to_string_lossy() == "-" {
        return "stdin".to_string();
    }

    input_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audiogroup".to_string())
}

/// `dump-<base>-<index>-<offset hex>.<ext>`
pub fn dump_file_name(base_name: &str, index: usize, offset: u64, extension: &str) -> String {
    format!("dump-{base_name}-{index:03}-{offset:08x}.{extension}")
}

/// Writes the track bytes to `path`, returning the byte count.
pub fn write_track(path: &Path, track: &ExtractedTrack) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("could not create {:?}", path.display().to_string()))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(&track.data)
        .and_then(|_| writer.flush())
        .with_context(|| format!("could not write to {:?}", path.display().to_string()))?;

    Ok(track.len())
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub input: String,
    pub declared_file_size: u32,
    pub track_count: usize,
    #[serde(default)]
    pub tracks: Vec<ManifestTrack>,
    #[serde(default)]
    pub skipped: Vec<SkippedTrack>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestTrack {
    pub index: usize,
    pub offset: u64,
    /// Inferred size; absent when the track runs to the end of the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferred_size: Option<u32>,
    pub written: usize,
    pub extension: String,
    pub file: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedTrack {
    pub index: usize,
    pub reason: String,
}

impl Manifest {
    pub fn new(input_path: &Path, header: &RawHeader, track_count: usize) -> Self {
        Self {
            input: input_path.display().to_string(),
            declared_file_size: header.file_size,
            track_count,
            tracks: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn push_written(
        &mut self,
        descriptor: &TrackDescriptor,
        track: &ExtractedTrack,
        file: PathBuf,
    ) {
        self.tracks.push(ManifestTrack {
            index: track.index,
            offset: track.offset,
            inferred_size: (!descriptor.is_unbounded()).then_some(descriptor.size),
            written: track.len(),
            extension: track.extension().to_string(),
            file,
        });
    }

    pub fn push_skipped(&mut self, index: usize, reason: impl ToString) {
        self.skipped.push(SkippedTrack {
            index,
            reason: reason.to_string(),
        });
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml_ng::to_string(self)?;
        std::fs::write(path, yaml).with_context(|| {
            format!("could not write manifest {:?}", path.display().to_string())
        })?;
        log::info!(
            "Manifest written to {} ({} tracks, {} skipped)",
            path.display(),
            self.tracks.len(),
            self.skipped.len()
        );
        Ok(())
    }
}
