/// Render elapsed seconds as `MM:SS`.
///
/// Minutes keep growing past 59; there is no hour field.
pub fn format_duration(elapsed_seconds: u64) -> String {
    format!("{:02}:{:02}", elapsed_seconds / 60, elapsed_seconds % 60)
}

/// Render samples as `"12... 7... 93..."`, or an empty string.
pub fn format_samples(samples: &[u32]) -> String {
    samples
        .iter()
        .map(|sample| format!("{sample}..."))
        .collect::<Vec<_>>()
        .join(" ")
}
