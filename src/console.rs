//! Local display sink
//!
//! Write-only console surface. `TerminalConsole` is the real one;
//! `MemoryConsole` keeps lines for inspection.

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use parking_lot::Mutex;
use std::io::{IsTerminal, Write};

/// One rendered line: colored prefix followed by content items
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub color: Color,
    pub prefix: String,
    pub content: Vec<String>,
}

impl StyledLine {
    /// Plain text of the line, items separated by spaces
    pub fn text(&self) -> String {
        let mut parts = Vec::with_capacity(self.content.len() + 1);
        if !self.prefix.is_empty() {
            parts.push(self.prefix.as_str());
        }
        parts.extend(self.content.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Local console surface
pub trait Console: Send + Sync {
    fn write_line(&self, line: &StyledLine);
}

// =============================================================================
// TerminalConsole
// =============================================================================

/// Stdout console, colored when attached to a terminal
#[derive(Debug, Clone, Copy)]
pub struct TerminalConsole {
    colored: bool,
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            colored: std::io::stdout().is_terminal(),
        }
    }
}

impl Console for TerminalConsole {
    fn write_line(&self, line: &StyledLine) {
        let mut out = std::io::stdout().lock();

        // Write errors (closed pipe etc.) are not worth failing a log call over
        let _ = if self.colored && !line.prefix.is_empty() {
            crossterm::queue!(
                out,
                SetForegroundColor(line.color),
                Print(&line.prefix),
                ResetColor
            )
        } else {
            crossterm::queue!(out, Print(&line.prefix))
        };

        for (i, item) in line.content.iter().enumerate() {
            let sep = if i == 0 && line.prefix.is_empty() { "" } else { " " };
            let _ = crossterm::queue!(out, Print(sep), Print(item));
        }
        let _ = crossterm::queue!(out, Print('\n'));
        let _ = out.flush();
    }
}

// =============================================================================
// MemoryConsole
// =============================================================================

/// Console that keeps every line in memory
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<StyledLine>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<StyledLine> {
        self.lines.lock().clone()
    }

    /// Plain text of every line, oldest first
    pub fn texts(&self) -> Vec<String> {
        self.lines.lock().iter().map(StyledLine::text).collect()
    }
}

impl Console for MemoryConsole {
    fn write_line(&self, line: &StyledLine) {
        self.lines.lock().push(line.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_joins_prefix_and_content() {
        let line = StyledLine {
            color: Color::White,
            prefix: "pageA".into(),
            content: vec!["hello".into(), "42".into()],
        };
        assert_eq!(line.text(), "pageA hello 42");
    }

    #[test]
    fn test_line_text_without_prefix() {
        let line = StyledLine {
            color: Color::White,
            prefix: String::new(),
            content: vec!["only".into()],
        };
        assert_eq!(line.text(), "only");
    }

    #[test]
    fn test_memory_console_records_in_order() {
        let console = MemoryConsole::new();
        for text in ["a", "b"] {
            console.write_line(&StyledLine {
                color: Color::Red,
                prefix: text.into(),
                content: vec![],
            });
        }
        assert_eq!(console.texts(), vec!["a", "b"]);
    }
}
