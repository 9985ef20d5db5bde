//! Stream statements: `OPEN`, `CLOSE`, `SOURCE`, `OUTPUT`, `APPEND`.

use std::path::PathBuf;

use sam_diagnostic::{fail, undefined};

use super::Args;
use crate::interpolate::literal_text;
use crate::interpreter::{Cursor, Interpreter};
use crate::signal::{ExecResult, RuntimeError, Signal};
use crate::sink::Sink;
use crate::streams::{Input, Mode, StreamError, StreamHandle};

/// Split `name AS path`; a bare path names itself.
fn split_open(args: &str) -> (Option<&str>, &str) {
    let mut parsed = Args::new(args.trim());
    if let Some(name) = parsed.word() {
        if parsed.skip_ws() && parsed.keyword("AS") && parsed.skip_ws() && !parsed.is_blank() {
            return (Some(name), parsed.rest().trim_end());
        }
    }
    (None, args.trim())
}

impl Interpreter {
    /// `OPEN name AS path` / `OPEN path`
    pub(crate) fn exec_open(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let (name, path) = split_open(args);
        let path = self.interpolate(literal_text(path), cursor)?;
        if path.is_empty() {
            return Err(self.syntax(cursor));
        }
        let name = name.map_or_else(|| path.clone(), str::to_string);
        tracing::debug!(name = %name, path = %path, "registering stream");
        self.env.open_stream(name, StreamHandle::new(PathBuf::from(path)));
        Ok(())
    }

    /// `CLOSE name`. The active input or output falls back to its default
    /// when it was bound to the closed handle.
    pub(crate) fn exec_close(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let name = self.interpolate(literal_text(args), cursor)?;
        let handle = self
            .env
            .remove_stream(&name)
            .ok_or_else(|| Signal::from(undefined(cursor.line())))?;

        if self.input.is_stream(&handle) {
            self.input = self.default_input.clone();
        }
        if self.output.is_stream(&handle) {
            self.output = self.default_output.clone();
        }
        handle.close().map_err(|source| {
            Signal::Fatal(RuntimeError::Close {
                path: handle.path().to_path_buf(),
                source,
            })
        })
    }

    /// `SOURCE name` / `SOURCE STDIN`
    pub(crate) fn exec_source(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let target = args.trim();
        if target == "STDIN" {
            tracing::debug!("input restored");
            self.input = self.default_input.clone();
            return Ok(());
        }
        let handle = self.bind_stream(target, Mode::Read, cursor)?;
        self.input = Input::Stream(handle);
        Ok(())
    }

    /// `OUTPUT name` / `APPEND name`, or `STDOUT` for either.
    pub(crate) fn exec_output(
        &mut self,
        args: &str,
        cursor: &mut Cursor,
        mode: Mode,
    ) -> ExecResult {
        let target = args.trim();
        if target == "STDOUT" {
            tracing::debug!("output restored");
            self.output = self.default_output.clone();
            return Ok(());
        }
        let handle = self.bind_stream(target, mode, cursor)?;
        self.output = Sink::Stream(handle);
        Ok(())
    }

    fn bind_stream(
        &self,
        target: &str,
        mode: Mode,
        cursor: &Cursor,
    ) -> Result<StreamHandle, Signal> {
        let name = self.interpolate(literal_text(target), cursor)?;
        let handle = self
            .env
            .stream(&name)
            .cloned()
            .ok_or_else(|| Signal::from(undefined(cursor.line())))?;

        match handle.bind(mode) {
            Ok(()) => {
                tracing::debug!(stream = %name, %mode, "stream bound");
                Ok(handle)
            }
            Err(StreamError::ModeConflict { bound, requested }) => {
                tracing::debug!(stream = %name, %bound, %requested, "mode conflict");
                Err(self.raise(fail(cursor.line())))
            }
            Err(StreamError::Open(source)) => Err(Signal::Fatal(RuntimeError::Open {
                path: handle.path().to_path_buf(),
                source,
            })),
        }
    }
}
