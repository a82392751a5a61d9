//! Logging utilities with colored output.
//!
//! Provides the `log!` macro for formatted terminal output with colored
//! prefixes, one line per event.
//!
//! # Example
//!
//! ```ignore
//! log!("publish"; "{} -> {}", note, post);
//! log!("warn"; "image not found: {}", path.display());
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{terminal::size, tty::IsTty};
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;

/// Calculate total prefix length for a module name.
///
/// Returns: `module.len() + 3` (for "[", "]", and trailing space)
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::utils::log::log($module, &format!($($arg)*))
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
///
/// Long messages are cut to the terminal width; redirected output is
/// written in full.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    let width = stdout.is_tty().then(|| get_terminal_width() as usize);
    let message = fit_message(message, module.len(), width);

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Message as printed after a prefix for a module name of `module_len`.
#[inline]
fn fit_message(message: &str, module_len: usize, width: Option<usize>) -> &str {
    match width {
        Some(width) => truncate_str(message, width.saturating_sub(calc_prefix_len(module_len))),
        None => message,
    }
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "publish" | "done" => prefix.bright_green().bold(),
        "skip" => prefix.bright_blue().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within max_len bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_prefix_len() {
        // "skip" -> "[skip] " = 4 + 2 + 1 = 7
        assert_eq!(calc_prefix_len(4), 7);
        // "publish" -> "[publish] " = 7 + 2 + 1 = 10
        assert_eq!(calc_prefix_len(7), 10);
        assert_eq!(calc_prefix_len(0), 3);
    }

    #[test]
    fn test_truncate_str_fits() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 5), "hello");
        assert_eq!(truncate_str("", 10), "");
    }

    #[test]
    fn test_truncate_str_needs_truncation() {
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn test_truncate_str_unicode_boundary() {
        // "你好" is 6 bytes (3 per char); byte 4 falls inside the second char
        assert_eq!(truncate_str("你好", 4), "你");
        assert_eq!(truncate_str("a你b", 3), "a");
    }

    #[test]
    fn test_fit_message_to_terminal() {
        let message = "image not found: /a/very/long/path/to/an/attachment.png";
        // "[warn] " takes 7 of the 20 columns
        assert_eq!(fit_message(message, 4, Some(20)), "image not fou");
        assert_eq!(fit_message("short", 4, Some(20)), "short");
    }

    #[test]
    fn test_fit_message_redirected_is_untouched() {
        let message = "image not found: /a/very/long/path/to/an/attachment.png";
        assert_eq!(fit_message(message, 4, None), message);
    }

    #[test]
    fn test_colorize_prefix_keeps_module_name() {
        colored::control::set_override(false);
        assert_eq!(colorize_prefix("skip", "skip").to_string(), "[skip]");
        assert_eq!(colorize_prefix("WARN", "warn").to_string(), "[WARN]");
        colored::control::unset_override();
    }
}
