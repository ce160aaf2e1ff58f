use colored::{Color, ColoredString, Colorize};
use std::io::{self, Stdout, Write};
use surrealctl_core::{Report, Severity};

pub struct Logger<W: Write = Stdout> {
    output: W,
}

impl<W: Write> Logger<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    fn marker(severity: Severity) -> ColoredString {
        match severity {
            Severity::Info => "ℹ".color(Color::Blue),
            Severity::Success => "✔".color(Color::Green),
            Severity::Warning => "⚠".color(Color::Yellow),
            Severity::Error => "✖".color(Color::Red),
        }
    }

    pub fn log(&mut self, severity: Severity, message: &str) {
        let prefix = Self::marker(severity);
        for line in message.lines() {
            let _ = writeln!(self.output, "{prefix} {line}");
        }
    }

    pub fn report(&mut self, report: &Report) {
        self.log(report.severity, &report.message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(io::stdout())
    }
}
