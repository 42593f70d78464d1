//! Colored status lines for the interactive output.
use colored::Colorize;

const RULE_WIDTH: usize = 60;

pub(crate) fn banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{}", rule.cyan());
    println!("{}", title.bold().cyan());
    println!("{}", rule.cyan());
}

pub(crate) fn section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}", "-".repeat(title.len()).dimmed());
}

pub(crate) fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub(crate) fn info(message: &str) {
    println!("{} {}", "●".blue(), message);
}

pub(crate) fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// A failed check or verdict; part of the report, so it goes to stdout.
pub(crate) fn failure(message: &str) {
    println!("{} {}", "✗".red(), message.red());
}

pub(crate) fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub(crate) fn action(message: &str) {
    println!("{} {}", "▶".cyan(), message);
}

/// Aligned `label: value` row inside a results block.
pub(crate) fn field(label: &str, value: &str) {
    println!("  {:<18} {}", format!("{}:", label).dimmed(), value);
}

/// Disables ANSI styling for the rest of the process.
pub(crate) fn disable_colors() {
    colored::control::set_override(false);
}
