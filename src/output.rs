//! Status output for the hexaflock CLI.
//!
//! Human-readable lines go to stderr with a right-aligned verb column.
//! stdout carries only JSON.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::types::Colour;
use crate::validation::{Diagnostic, Severity};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const VERB_WIDTH: usize = 12;

/// Colour of a status verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Done,
    Info,
    Fail,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Done => GREEN,
            Tone::Info => CYAN,
            Tone::Fail => RED,
        }
    }
}

/// Writes status lines, colouring them when stderr is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// `   Generated flocks/flock_42.png (24x24, 402 bytes)`
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(&self.line(Tone::Done, verb, message));
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(&self.line(Tone::Info, verb, message));
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(&self.line(Tone::Fail, verb, message));
    }

    /// Format one status line without printing it.
    pub fn line(&self, tone: Tone, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{}{verb:>VERB_WIDTH$}{RESET} {message}", tone.ansi())
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }

    /// A path relative to the working directory, highlighted.
    pub fn path(&self, path: &Path) -> String {
        self.paint(CYAN, &display_path(path))
    }

    /// Two cells of `colour` followed by its hex code.
    pub fn swatch(&self, colour: Colour) -> String {
        if self.color {
            format!("\x1b[48;2;{};{};{}m  {RESET} {}", colour.r, colour.g, colour.b, colour)
        } else {
            colour.to_string()
        }
    }

    /// `error: message [code]` with an indented help line when present.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let label_colour = match diagnostic.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
        };
        let label = if self.color {
            format!("{BOLD}{label_colour}{}{RESET}", diagnostic.severity)
        } else {
            diagnostic.severity.to_string()
        };

        let mut out = format!(
            "{}: {} {}",
            label,
            diagnostic.message,
            self.paint(DIM, &format!("[{}]", diagnostic.code))
        );
        if let Some(help) = &diagnostic.help {
            out.push_str(&format!("\n  {} {}", self.paint(DIM, "help:"), help));
        }
        out
    }

    fn paint(&self, ansi: &str, text: &str) -> String {
        if self.color {
            format!("{ansi}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(&self, line: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", line);
    }
}

/// `plural(1, "stamp", "stamps")` is "1 stamp".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { pluralized })
}

/// Path relative to the working directory when it lies below it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
