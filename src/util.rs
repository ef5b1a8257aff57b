/// Formats a play time in seconds as `HH:MM:SS`.
///
/// Fractions are truncated. Negative and NaN inputs show as `00:00:00`.
pub fn format_seconds(total: f64) -> String {
    let total = total.max(0.0) as u64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;

    format!("{:02}:{:02}:{:02}", h, m, s)
}
