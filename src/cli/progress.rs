use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

pub fn create_progress_bar(multi: &MultiProgress, total_tracks: u64) -> Result<ProgressBar> {
    let pb = multi.add(ProgressBar::new(total_tracks));
    pb.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} tracks ({percent}%)\n{msg} | elapsed: {elapsed_precise}",
    )?);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message("dumping tracks");
    Ok(pb)
}

/// Prints a line to stdout without tearing the progress bar.
pub fn print_line(pb: Option<&ProgressBar>, line: &str) {
    match pb {
        Some(pb) => pb.suspend(|| println!("{line}")),
        None => println!("{line}"),
    }
}
