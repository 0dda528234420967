use std::time::Duration;

/// Formats a wall-clock duration, `hh:mm:ss.mmm` or milliseconds under a second.
pub fn elapsed_str(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        return format!("{:.3}ms", elapsed.as_secs_f64() * 1000f64);
    }

    let total_ms = elapsed.as_millis();
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let milliseconds = total_ms % 1000;

    format!(
        "{hours:0width$}:{minutes:02}:{seconds:02}.{milliseconds:03}",
        width = if hours >= 100 { 0 } else { 2 }
    )
}

#[test]
fn elapsed_formats() {
    assert_eq!(elapsed_str(Duration::from_micros(1500)), "1.500ms");
    assert_eq!(elapsed_str(Duration::from_millis(61_005)), "00:01:01.005");
    assert_eq!(elapsed_str(Duration::from_secs(360_000)), "100:00:00.000");
}
