use crossterm::style::Stylize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Pretty printing utilities for workbench output
pub struct Formatter;

impl Formatter {
    /// Format an instruction call for display.
    pub fn format_instruction_call(program: &str, instruction: &str, args: Option<&str>) -> String {
        match args {
            Some(args) if !args.is_empty() => format!("{}::{}({})", program, instruction, args),
            _ => format!("{}::{}()", program, instruction),
        }
    }

    /// Format a derived address with its bump seed.
    pub fn format_derived_address(address: &str, bump: u8) -> String {
        format!("{} (bump {})", address, bump)
    }

    /// Format a numbered menu option line.
    pub fn format_option(index: &str, label: &str) -> String {
        format!("{}) {}", index, label)
    }

    /// Format an informational message in blue.
    pub fn info(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Info)
    }

    /// Format a success message in green.
    pub fn success(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Success)
    }

    /// Format a warning message in yellow.
    pub fn warning(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Warning)
    }

    /// Format an error message in red.
    pub fn error(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Error)
    }

    /// Configure whether ANSI colors are enabled.
    pub fn configure_colors(enable: bool) {
        COLOR_ENABLED.store(enable, Ordering::Relaxed);
    }

    /// Auto-configure color output based on environment.
    pub fn configure_colors_from_env() {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self::configure_colors(!no_color);
    }

    fn apply_color(message: &str, kind: ColorKind) -> String {
        if !COLOR_ENABLED.load(Ordering::Relaxed) {
            return message.to_string();
        }

        match kind {
            ColorKind::Info => format!("{}", message.blue()),
            ColorKind::Success => format!("{}", message.green()),
            ColorKind::Warning => format!("{}", message.yellow()),
            ColorKind::Error => format!("{}", message.red()),
        }
    }
}

#[derive(Copy, Clone)]
enum ColorKind {
    Info,
    Success,
    Warning,
    Error,
}

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_instruction_call() {
        assert_eq!(
            Formatter::format_instruction_call("lottery", "join", Some(r#"["a", 10]"#)),
            r#"lottery::join(["a", 10])"#
        );
        assert_eq!(
            Formatter::format_instruction_call("lottery", "reveal", None),
            "lottery::reveal()"
        );
    }

    #[test]
    fn test_colors_disabled_returns_plain_text() {
        Formatter::configure_colors(false);
        assert_eq!(Formatter::error("boom"), "boom");
        assert_eq!(Formatter::info("hello"), "hello");
    }
}
