//! Colored console messages for humans (stderr), kept apart from the
//! machine-readable results on stdout

use colored::Colorize;

pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// `error: <message>` with the causes listed underneath
    pub fn error(message: &str, causes: &[String]) -> String {
        let mut output = format!("{} {}", "error:".red().bold(), message);
        for cause in causes {
            output.push_str(&format!("\n  {} {}", "caused by:".yellow(), cause));
        }
        output
    }

    pub fn warning(message: &str) -> String {
        format!("{} {}", "warning:".yellow().bold(), message)
    }

    /// Section header used by `--show-config`
    pub fn section_header(title: &str) -> String {
        format!("\n{}\n{}", title.cyan().bold(), "─".repeat(title.chars().count()).cyan())
    }
}
