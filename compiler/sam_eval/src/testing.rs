//! Shared fixtures for unit tests.

use crate::interpreter::{Cursor, Interpreter, InterpreterBuilder};
use crate::signal::ExecResult;
use crate::sink::{SharedBuffer, Sink};
use crate::streams::Input;

/// An interpreter wired to in-memory streams.
pub(crate) struct Harness {
    pub(crate) interp: Interpreter,
    pub(crate) output: SharedBuffer,
    pub(crate) console: SharedBuffer,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with_input("")
    }

    pub(crate) fn with_input(input: &str) -> Self {
        let (output_sink, output) = Sink::buffer();
        let (console_sink, console) = Sink::buffer();
        let interp = InterpreterBuilder::new()
            .input(Input::lines(input))
            .output(output_sink)
            .console(console_sink)
            .build();
        Harness {
            interp,
            output,
            console,
        }
    }

    /// Store numbered program lines.
    pub(crate) fn program(&mut self, lines: &[(usize, &str)]) -> &mut Self {
        for (number, text) in lines {
            self.interp.define_line(*number, *text);
        }
        self
    }

    /// Execute one statement on a detached cursor, without outermost
    /// condition handling.
    pub(crate) fn exec(&mut self, line: &str) -> ExecResult {
        let mut cursor = Cursor::detached();
        self.interp.dispatch(line, &mut cursor)
    }

    /// Output written so far, clearing the buffer.
    pub(crate) fn take_output(&self) -> String {
        self.output.take()
    }
}

/// The condition a statement raised, if it raised one.
pub(crate) fn raised(result: ExecResult) -> Option<sam_diagnostic::Condition> {
    match result {
        Err(crate::signal::Signal::Raise(condition)) => Some(condition),
        _ => None,
    }
}

/// A reader that blocks until a chunk is sent, and ends when the sender
/// is dropped.
pub(crate) struct Gate(pub(crate) std::sync::mpsc::Receiver<Vec<u8>>);

impl Gate {
    pub(crate) fn open() -> (std::sync::mpsc::Sender<Vec<u8>>, std::io::BufReader<Gate>) {
        let (sender, chunks) = std::sync::mpsc::channel();
        (sender, std::io::BufReader::new(Gate(chunks)))
    }
}

impl std::io::Read for Gate {
    fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
        let Ok(chunk) = self.0.recv() else {
            return Ok(0);
        };
        let len = chunk.len().min(out.len());
        out[..len].copy_from_slice(&chunk[..len]);
        Ok(len)
    }
}
