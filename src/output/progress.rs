use indicatif::{ProgressState, ProgressStyle};
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Get a progress bar style with a custom elapsed time formatter.
pub fn get_progress_style() -> ProgressStyle {
    let style = ProgressStyle::default_bar().template(
        "{spinner:.green} {msg} [{elapsed_precise_subsec}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
    );

    let style = match style {
        Ok(s) => s,
        Err(_) => ProgressStyle::default_bar(),
    };

    style
        .with_key("elapsed_precise_subsec", elapsed_precise_subsec)
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
        .progress_chars("#>-")
}

/// Custom formatter for elapsed time with millisecond precision.
fn elapsed_precise_subsec(state: &ProgressState, writer: &mut dyn std::fmt::Write) {
    let _ = write!(writer, "{}", format_elapsed(state.elapsed()));
}

/// HH:MM:SS.mmm
pub fn format_elapsed(elapsed: std::time::Duration) -> String {
    let secs = elapsed.as_secs();
    let sub_ms = elapsed.subsec_millis();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, s, sub_ms)
}

/// Attach a progress bar of known length to `span` and start it.
pub fn start_progress(span: &Span, message: &str, total: u64) {
    span.pb_set_style(&get_progress_style());
    span.pb_set_message(message);
    span.pb_set_length(total);
    span.pb_set_position(0);
    span.pb_start();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn elapsed_format() {
        assert_eq!(format_elapsed(Duration::from_millis(3_723_045)), "01:02:03.045");
        assert_eq!(format_elapsed(Duration::ZERO), "00:00:00.000");
    }

    #[test]
    fn progress_on_unregistered_span_is_noop() {
        let span = tracing::info_span!("test_progress");
        start_progress(&span, "Wordlist", 10);
        span.pb_inc(1);
    }
}
