//! Output sinks.
//!
//! The active output stream and the diagnostic console are both a [`Sink`].
//! Enum dispatch keeps the per-statement write path free of trait objects.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::streams::StreamHandle;

/// An in-memory capture buffer. Clones share the same text.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer(Arc<Mutex<String>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&self, text: &str) {
        self.0.lock().push_str(text);
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.0.lock().clone()
    }

    /// Return the captured text and empty the buffer.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.0.lock())
    }
}

#[derive(Clone, Debug)]
pub enum Sink {
    /// The process's standard output.
    Stdout,
    /// Captured in memory.
    Buffer(SharedBuffer),
    /// A handle bound with `OUTPUT` or `APPEND`.
    Stream(StreamHandle),
    /// Discards everything.
    Silent,
}

impl Sink {
    pub fn buffer() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Sink::Buffer(buffer.clone()), buffer)
    }

    /// Write `text` as is. Standard output is flushed so prompts and
    /// terminal escapes appear immediately.
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        match self {
            Sink::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Sink::Buffer(buffer) => {
                buffer.push_str(text);
                Ok(())
            }
            Sink::Stream(handle) => handle.write_str(text),
            Sink::Silent => Ok(()),
        }
    }

    pub fn write_line(&self, text: &str) -> io::Result<()> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.write_str(&line)
    }

    pub fn flush(&self) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().flush(),
            Sink::Stream(handle) => handle.flush(),
            Sink::Buffer(_) | Sink::Silent => Ok(()),
        }
    }

    /// Human-readable target for error messages.
    pub fn describe(&self) -> String {
        match self {
            Sink::Stdout => "standard output".to_string(),
            Sink::Buffer(_) => "output buffer".to_string(),
            Sink::Stream(handle) => format!("`{}`", handle.path().display()),
            Sink::Silent => "silent sink".to_string(),
        }
    }

    pub fn is_stream(&self, handle: &StreamHandle) -> bool {
        matches!(self, Sink::Stream(bound) if bound.same_stream(handle))
    }
}

#[cfg(test)]
mod tests;
