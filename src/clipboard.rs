//! Clipboard access.
//!
//! Copying goes through the [`Clipboard`] trait so the rest of the crate
//! never touches the terminal directly. [`Osc52Clipboard`] asks the
//! terminal emulator to set the system clipboard with an OSC 52 escape
//! sequence, which also works over SSH. [`MemoryClipboard`] records writes
//! and is what the tests use.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Errors raised while writing to the clipboard.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Failed to write to the terminal clipboard: {0}")]
    Io(#[from] io::Error),

    #[error("Nothing to copy")]
    Empty,
}

/// A sink for copied text.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Strips all whitespace from a selection before it is copied.
///
/// Returns `None` when nothing is left.
pub fn prepare_selection(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Copies a selection: whitespace is stripped, empty selections are refused.
///
/// Returns the text that was actually written.
pub fn copy_selection(clipboard: &mut dyn Clipboard, raw: &str) -> Result<String, ClipboardError> {
    let text = prepare_selection(raw).ok_or(ClipboardError::Empty)?;
    clipboard.write_text(&text)?;
    Ok(text)
}

/// Writes OSC 52 sequences to a terminal.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        // OSC 52 carries standard padded base64
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub history: Vec<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.history.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn osc52_payload(text: &str) -> String {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text(text).unwrap();
        String::from_utf8(clipboard.into_inner()).unwrap()
    }

    #[test]
    fn test_osc52_padding() {
        assert_eq!(osc52_payload("M"), "\x1b]52;c;TQ==\x07");
        assert_eq!(osc52_payload("Ma"), "\x1b]52;c;TWE=\x07");
        assert_eq!(osc52_payload("ARND-C"), "\x1b]52;c;QVJORC1D\x07");
    }

    #[test]
    fn test_prepare_selection_strips_whitespace() {
        assert_eq!(prepare_selection(" AR N\n D\t"), Some("ARND".to_string()));
        assert_eq!(prepare_selection("  \n "), None);
        assert_eq!(prepare_selection(""), None);
    }

    #[test]
    fn test_copy_selection_records_text() {
        let mut clipboard = MemoryClipboard::new();
        let copied = copy_selection(&mut clipboard, "A R N").unwrap();
        assert_eq!(copied, "ARN");
        assert_eq!(clipboard.last(), Some("ARN"));
    }

    #[test]
    fn test_copy_empty_selection_writes_nothing() {
        let mut clipboard = MemoryClipboard::new();
        let result = copy_selection(&mut clipboard, "   ");
        assert!(matches!(result, Err(ClipboardError::Empty)));
        assert!(clipboard.history.is_empty());
    }

    #[test]
    fn test_osc52_sequence() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("Man").unwrap();
        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(written, "\x1b]52;c;TWFu\x07");
    }
}
