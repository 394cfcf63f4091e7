use colored::Colorize;

/// Semantic level of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Helper function to print a status message with semantic level
pub fn set_status(text: impl AsRef<str>, level: StatusLevel) {
    let text = text.as_ref();
    let line = match level {
        StatusLevel::Info => text.normal(),
        StatusLevel::Success => text.green(),
        StatusLevel::Warning => text.yellow(),
        StatusLevel::Error => text.red().bold(),
    };
    eprintln!("{}", line);
}

/// Print a titled error with details, the terminal stand-in for an error dialog
pub fn show_error(title: &str, message: &str, details: &str) {
    eprintln!("{} {}", format!("{}:", title).red().bold(), message);
    for line in details.lines() {
        eprintln!("  {}", line);
    }
}
