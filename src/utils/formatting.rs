//! Formatting utilities used for CLI outputs.

/// `7h`, `0h`.
pub fn fmt_hours(hours: u32) -> String {
    format!("{}h", hours)
}

/// `logged / expected (pct%)`.
pub fn fmt_progress(logged: u32, expected: u32, pct: u32) -> String {
    format!("{}h / {}h ({}%)", logged, expected, pct)
}

/// Wrap a long description into lines of at most `width` columns.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}
