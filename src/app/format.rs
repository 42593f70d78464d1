use std::fmt::Write as _;
use std::time::Duration;

use crate::error::{AppError, AppResult, ReportError};

pub(crate) fn write_line(output: &mut String, line: &str) -> AppResult<()> {
    writeln!(output, "{}", line)
        .map_err(|err| AppError::report(ReportError::WriteLine { source: err }))
}

/// Renders a two-decimal fixed-point value (`7050` -> `70.50`).
pub(crate) fn format_x100(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

/// Seconds with millisecond precision (`50ms` -> `0.050s`).
pub(crate) fn format_secs(duration: Duration) -> String {
    let millis = duration.as_millis();
    format!("{}.{:03}s", millis / 1000, millis % 1000)
}
