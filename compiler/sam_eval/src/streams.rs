//! Named file streams and input sources.
//!
//! `OPEN` only records a path. The file is opened the first time a
//! `SOURCE`, `OUTPUT` or `APPEND` binds the handle, and that first mode
//! sticks until `CLOSE`. Handles are shared between a branch and its parent,
//! so the state lives behind a mutex.

use std::collections::VecDeque;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::line_reader::LineReader;

/// How a stream handle is bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Read,
    Write,
    Append,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Read => "read",
            Mode::Write => "write",
            Mode::Append => "append",
        })
    }
}

#[derive(Debug)]
pub enum StreamError {
    /// The handle is already open in another mode.
    ModeConflict { bound: Mode, requested: Mode },
    /// The file could not be opened.
    Open(io::Error),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ModeConflict { bound, requested } => {
                write!(f, "stream is open for {bound}, cannot bind for {requested}")
            }
            StreamError::Open(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StreamError {}

#[derive(Debug)]
enum StreamState {
    Unopened,
    Reading(BufReader<File>),
    Writing { file: File, mode: Mode },
    Closed,
}

/// A lazily opened file shared by every context that holds a clone.
#[derive(Clone, Debug)]
pub struct StreamHandle {
    path: Arc<PathBuf>,
    state: Arc<Mutex<StreamState>>,
}

impl StreamHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StreamHandle {
            path: Arc::new(path.into()),
            state: Arc::new(Mutex::new(StreamState::Unopened)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The mode the handle is open in, if any.
    pub fn mode(&self) -> Option<Mode> {
        match &*self.state.lock() {
            StreamState::Reading(_) => Some(Mode::Read),
            StreamState::Writing { mode, .. } => Some(*mode),
            StreamState::Unopened | StreamState::Closed => None,
        }
    }

    /// Whether two handles refer to the same stream.
    pub fn same_stream(&self, other: &StreamHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Open the file in `mode` unless it is already open in that mode.
    pub fn bind(&self, mode: Mode) -> Result<(), StreamError> {
        let mut state = self.state.lock();
        match &*state {
            StreamState::Reading(_) if mode == Mode::Read => return Ok(()),
            StreamState::Writing { mode: bound, .. } if *bound == mode => return Ok(()),
            StreamState::Reading(_) => {
                return Err(StreamError::ModeConflict {
                    bound: Mode::Read,
                    requested: mode,
                })
            }
            StreamState::Writing { mode: bound, .. } => {
                return Err(StreamError::ModeConflict {
                    bound: *bound,
                    requested: mode,
                })
            }
            StreamState::Unopened | StreamState::Closed => {}
        }

        let opened = match mode {
            Mode::Read => {
                File::open(&*self.path).map(|file| StreamState::Reading(BufReader::new(file)))
            }
            Mode::Write => {
                File::create(&*self.path).map(|file| StreamState::Writing { file, mode })
            }
            Mode::Append => OpenOptions::new()
                .append(true)
                .create(true)
                .open(&*self.path)
                .map(|file| StreamState::Writing { file, mode }),
        };
        *state = opened.map_err(StreamError::Open)?;
        tracing::debug!(path = %self.path.display(), %mode, "opened stream");
        Ok(())
    }

    /// Read one line without its terminator; `None` at end of file.
    pub fn read_line(&self) -> io::Result<Option<String>> {
        match &mut *self.state.lock() {
            StreamState::Reading(reader) => read_trimmed_line(reader),
            _ => Err(not_open(Mode::Read)),
        }
    }

    pub fn write_str(&self, text: &str) -> io::Result<()> {
        match &mut *self.state.lock() {
            StreamState::Writing { file, .. } => file.write_all(text.as_bytes()),
            _ => Err(not_open(Mode::Write)),
        }
    }

    pub fn flush(&self) -> io::Result<()> {
        match &mut *self.state.lock() {
            StreamState::Writing { file, .. } => file.flush(),
            _ => Ok(()),
        }
    }

    /// Flush and release the file. Later reads and writes fail.
    pub fn close(&self) -> io::Result<()> {
        let mut state = self.state.lock();
        if let StreamState::Writing { file, .. } = &mut *state {
            file.flush()?;
        }
        *state = StreamState::Closed;
        Ok(())
    }
}

fn not_open(mode: Mode) -> io::Error {
    io::Error::other(format!("stream is not open for {mode}"))
}

/// Read a line and strip a trailing `\n` or `\r\n`.
pub(crate) fn read_trimmed_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Queued input lines, shared between clones.
#[derive(Clone, Debug, Default)]
pub struct SharedLines(Arc<Mutex<VecDeque<String>>>);

impl SharedLines {
    pub fn from_text(text: &str) -> Self {
        SharedLines(Arc::new(Mutex::new(
            text.lines().map(str::to_string).collect(),
        )))
    }

    pub fn push(&self, line: impl Into<String>) {
        self.0.lock().push_back(line.into());
    }

    fn pop(&self) -> Option<String> {
        self.0.lock().pop_front()
    }
}

/// Where `READ` takes its lines from.
#[derive(Clone, Debug)]
pub enum Input {
    /// The process's standard input.
    Stdin,
    /// Lines from a background reader other than standard input.
    Reader(LineReader),
    /// An in-memory queue (tests, embedding).
    Lines(SharedLines),
    /// A handle bound with `SOURCE`.
    Stream(StreamHandle),
}

impl Input {
    pub fn lines(text: &str) -> Self {
        Input::Lines(SharedLines::from_text(text))
    }

    pub fn read_line(&self) -> io::Result<Option<String>> {
        match self {
            Input::Stdin => LineReader::stdin()?.read_line(),
            Input::Reader(reader) => reader.read_line(),
            Input::Lines(lines) => Ok(lines.pop()),
            Input::Stream(handle) => handle.read_line(),
        }
    }

    /// Like [`Input::read_line`], but a read waiting on a terminal or pipe
    /// fails with [`io::ErrorKind::Interrupted`] once `interrupt` is set.
    pub fn read_line_until(&self, interrupt: &AtomicBool) -> io::Result<Option<String>> {
        match self {
            Input::Stdin => LineReader::stdin()?.read_line_until(interrupt),
            Input::Reader(reader) => reader.read_line_until(interrupt),
            Input::Lines(_) | Input::Stream(_) => self.read_line(),
        }
    }

    /// Name reported by `EOF` diagnostics.
    pub fn source_name(&self) -> String {
        match self {
            Input::Stdin | Input::Reader(_) | Input::Lines(_) => "<stdin>".to_string(),
            Input::Stream(handle) => handle.path().display().to_string(),
        }
    }

    pub fn is_stream(&self, handle: &StreamHandle) -> bool {
        matches!(self, Input::Stream(bound) if bound.same_stream(handle))
    }
}

#[cfg(test)]
mod tests;
