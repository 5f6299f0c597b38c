use std::fmt;

use chrono::Local;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f%:z";
const TIME_ONLY_FORMAT: &str = "%H:%M:%S%.6f%:z";

/// Date, time and offset, for log files (YYYY-MM-DD HH:MM:SS.mmmmmm+00:00)
pub struct LocalDateTime;

impl FormatTime for LocalDateTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format(DATE_TIME_FORMAT))
    }
}

/// Time and offset only, for the console (HH:MM:SS.mmmmmm+00:00)
pub struct LocalTimeOnly;

impl FormatTime for LocalTimeOnly {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format(TIME_ONLY_FORMAT))
    }
}

/// Current local date and time for the start banner.
pub fn local_timestamp() -> String {
    Local::now().format(DATE_TIME_FORMAT).to_string()
}
