use anyhow::{Context, Result};
use chrono::TimeZone;
use std::env;
use std::fs;
use std::process::Command;
use vergen_gitcl::{Emitter, GitclBuilder};

fn main() -> Result<()> {
    let gitcl = GitclBuilder::default()
        .describe(true, true, Some("[0-9]*"))
        .build()?;

    let gitcl_res = Emitter::default()
        .idempotent()
        .fail_on_error()
        .add_instructions(&gitcl)
        .and_then(|emitter| emitter.emit());

    if let Err(e) = gitcl_res {
        eprintln!("error occurred while generating instructions: {e:?}");
        Emitter::default().idempotent().fail_on_error().emit()?;
    }

    // Reproducible builds pin the timestamp through SOURCE_DATE_EPOCH
    let now = match env::var("SOURCE_DATE_EPOCH") {
        Ok(val) => {
            let secs = val
                .parse::<i64>()
                .context("SOURCE_DATE_EPOCH is not an integer")?;
            chrono::Utc
                .timestamp_opt(secs, 0)
                .single()
                .context("SOURCE_DATE_EPOCH is out of range")?
        }
        Err(_) => chrono::Utc::now(),
    };

    println!(
        "cargo:rustc-env=BUILD_TIMESTAMP={}",
        now.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let audiogroup_version = audiogroup_version_from_metadata().unwrap_or_else(|_| {
        read_audiogroup_version_fallback().unwrap_or_else(|_| "unknown".to_string())
    });
    println!("cargo:rustc-env=AUDIOGROUP_VERSION={audiogroup_version}");

    println!("cargo:rerun-if-changed=audiogroup/Cargo.toml");

    Ok(())
}

/// Looks the library up in `cargo metadata`, local member or registry package.
fn audiogroup_version_from_metadata() -> Result<String> {
    let output = Command::new("cargo")
        .args(["metadata", "--format-version", "1"])
        .output()?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed");
    }

    let metadata: serde_json::Value = serde_json::from_slice(&output.stdout)?;

    let version = metadata["packages"]
        .as_array()
        .into_iter()
        .flatten()
        .find(|package| package["name"].as_str() == Some("audiogroup"))
        .and_then(|package| package["version"].as_str());

    if let Some(version) = version {
        return Ok(version.to_string());
    }

    // "audiogroup 0.1.0 (registry+...)"
    let version = metadata["resolve"]["nodes"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|node| node["id"].as_str())
        .find_map(|id| {
            let mut parts = id.split(' ');
            match (parts.next(), parts.next()) {
                (Some("audiogroup"), Some(version)) => Some(version.to_string()),
                _ => None,
            }
        });

    version.context("audiogroup package not found in metadata")
}

fn read_audiogroup_version_fallback() -> Result<String> {
    let toml_content = fs::read_to_string("audiogroup/Cargo.toml")?;

    toml_content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("version"))
        .find_map(|line| line.split_once('='))
        .map(|(_, version)| version.trim().trim_matches('"').trim_matches('\'').to_string())
        .context("Could not find version in audiogroup/Cargo.toml")
}
