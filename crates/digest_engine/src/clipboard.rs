use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Io(#[from] io::Error),
}

/// Write-only clipboard.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Sets the system clipboard through the terminal with an OSC 52 escape sequence.
///
/// Supported by most modern terminal emulators, including over SSH. Terminals
/// without support ignore the sequence.
pub struct Osc52Clipboard<W> {
    out: Mutex<W>,
}

impl Osc52Clipboard<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let sequence = osc52_sequence(text);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(sequence.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64.encode(text.as_bytes()))
}

/// Records clipboard writes in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, i.e. the current clipboard contents.
    pub fn contents(&self) -> Option<String> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }
}
