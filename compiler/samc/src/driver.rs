//! Program ingestion and outermost execution.

use std::fs;
use std::io;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use sam_diagnostic::{EXIT_FATAL, EXIT_OK};
use sam_eval::{FatalReport, Interpreter, LineReader, Outcome, RuntimeError};

use crate::crash::write_crash_dump;

/// Split a numbered program line into its number and statement text.
///
/// A numbered line is a run of digits, whitespace, then at least one more
/// character. Anything else is an immediate command.
pub fn split_numbered(line: &str) -> Option<(usize, &str)> {
    let digits = line.find(|c: char| !c.is_ascii_digit())?;
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let gap = rest.chars().next().filter(|c| c.is_whitespace())?;
    if rest.len() == gap.len_utf8() {
        return None;
    }
    let number = line[..digits].parse().ok()?;
    Some((number, rest.trim_start()))
}

/// Drives one interpreter through a program source.
#[derive(Debug)]
pub struct Driver {
    interp: Interpreter,
    crash_dir: PathBuf,
}

impl Driver {
    /// Crash dumps go to the working directory.
    pub fn new(interp: Interpreter) -> Self {
        Driver {
            interp,
            crash_dir: PathBuf::new(),
        }
    }

    /// Directory crash dumps are written to.
    #[must_use]
    pub fn crash_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.crash_dir = dir.into();
        self
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interp
    }

    /// Store or execute one input line. `Break` carries the exit status
    /// when the input should stop being read.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn feed_line(&mut self, line: &str) -> ControlFlow<i32> {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some((number, text)) = split_numbered(line) {
            self.interp.define_line(number, text);
            return ControlFlow::Continue(());
        }
        if line.trim().is_empty() {
            return ControlFlow::Continue(());
        }
        let outcome = self.interp.execute_outermost(line);
        self.settle(outcome)
    }

    /// Feed every line of `source`, then wait for branches.
    pub fn run_source(&mut self, source: &str) -> i32 {
        let status = match self.feed_all(source) {
            ControlFlow::Continue(()) => EXIT_OK,
            ControlFlow::Break(status) => status,
        };
        self.finish(status)
    }

    /// Ingest a program file and run it as an outermost scope.
    #[tracing::instrument(level = "debug", skip(self, path), fields(path = %path.display()))]
    pub fn run_file(&mut self, path: &Path) -> i32 {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(source) => {
                let report = self.interp.fatal_report(RuntimeError::Open {
                    path: path.to_path_buf(),
                    source,
                });
                let status = self.crash(&report);
                return self.finish(status);
            }
        };

        if let ControlFlow::Break(status) = self.feed_all(&source) {
            return self.finish(status);
        }
        let outcome = self.interp.execute_outermost("RUN");
        let status = match self.settle(outcome) {
            ControlFlow::Continue(()) => EXIT_OK,
            ControlFlow::Break(status) => status,
        };
        self.finish(status)
    }

    /// Read the program from standard input until it ends.
    ///
    /// Lines come from the shared standard input reader, which `READ` also
    /// uses. An interrupt while waiting for a line is raised as `CTRLC`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn run_stdin(&mut self) -> i32 {
        let reader = match LineReader::stdin() {
            Ok(reader) => reader,
            Err(source) => return self.read_failure(source),
        };
        loop {
            match reader.read_line_until(self.interp.interrupt()) {
                Ok(None) => return self.finish(EXIT_OK),
                Ok(Some(line)) => {
                    if let ControlFlow::Break(status) = self.feed_line(&line) {
                        return self.finish(status);
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    let outcome = self.interp.take_interrupt();
                    if let ControlFlow::Break(status) = self.settle(outcome) {
                        return self.finish(status);
                    }
                }
                Err(source) => return self.read_failure(source),
            }
        }
    }

    fn read_failure(&self, source: io::Error) -> i32 {
        let report = self.interp.fatal_report(RuntimeError::Read {
            target: "standard input".to_string(),
            source,
        });
        let status = self.crash(&report);
        self.finish(status)
    }

    fn feed_all(&mut self, source: &str) -> ControlFlow<i32> {
        for line in source.lines() {
            if let ControlFlow::Break(status) = self.feed_line(line) {
                return ControlFlow::Break(status);
            }
        }
        ControlFlow::Continue(())
    }

    fn settle(&self, outcome: Outcome) -> ControlFlow<i32> {
        match outcome {
            Outcome::Continue => ControlFlow::Continue(()),
            Outcome::Exit(status) => ControlFlow::Break(status),
            Outcome::Fatal(report) => ControlFlow::Break(self.crash(&report)),
        }
    }

    /// Wait for every branch and pass `status` through.
    fn finish(&self, status: i32) -> i32 {
        for (id, outcome) in self.interp.branches().join_all() {
            match outcome {
                Outcome::Continue => tracing::debug!(branch = id, "branch finished"),
                Outcome::Exit(code) => tracing::debug!(branch = id, status = code, "branch exited"),
                Outcome::Fatal(report) => {
                    self.crash(&report);
                }
            }
        }
        status
    }

    fn crash(&self, report: &FatalReport) -> i32 {
        tracing::error!(error = %report.error, "internal failure");
        match write_crash_dump(&self.crash_dir, report) {
            Ok(path) => {
                let message = format!("FATAL INTERPRETER ERROR - DETAILS IN {}", path.display());
                if let Err(err) = self.interp.console().write_line(&message) {
                    tracing::error!(%err, "could not report crash");
                }
            }
            Err(err) => {
                tracing::error!(%err, "could not write crash dump");
                eprintln!("FATAL INTERPRETER ERROR - {}", report.error);
            }
        }
        EXIT_FATAL
    }
}

#[cfg(test)]
mod tests;
