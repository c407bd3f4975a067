/// Format `seconds` as `00:MM:SS.FF`, where `FF` counts frames at
/// `frame_rate`. Minutes are not wrapped into hours.
pub fn format_timecode(seconds: f64, frame_rate: u32) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let whole = seconds.floor();
    let mins = (whole / 60.0).floor() as u64;
    let secs = (whole % 60.0) as u64;
    let frames = ((seconds - whole) * f64::from(frame_rate)).floor() as u64;
    format!("00:{mins:02}:{secs:02}.{frames:02}")
}

/// Format `seconds` as `MM:SS`.
pub fn format_mmss(seconds: f64) -> String {
    let secs = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
