//! Output and variables: `PRINT`, `WRITE`, `SPR`, `LET`, `READ`, `ATOI`.

use std::io;

use sam_diagnostic::{end_of_file, undefined};
use sam_patterns::syntax::scan_name;

use super::Args;
use crate::interpolate::literal_text;
use crate::interpreter::{Cursor, Interpreter};
use crate::signal::{ExecResult, RuntimeError, Signal};

/// Target of a `READ`.
enum ReadTarget<'a> {
    Str(&'a str),
    Num(&'a str),
}

impl Interpreter {
    pub(crate) fn exec_print(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let mut text = self.interpolate(literal_text(args), cursor)?;
        text.push('\n');
        self.write_raw(&text)
    }

    pub(crate) fn exec_write(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let text = self.interpolate(literal_text(args), cursor)?;
        self.write_raw(&text)?;
        self.flush_output()
    }

    /// `SPR $name text`
    pub(crate) fn exec_spr(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let mut parsed = Args::new(args);
        let name = parsed.sigil_name('$').ok_or_else(|| self.syntax(cursor))?;
        parsed.skip_ws();
        let value = self.interpolate(literal_text(parsed.rest()), cursor)?;
        self.env.set_str(name, value);
        Ok(())
    }

    /// `LET #name BE expr` or `LET ?name BE [NOT] (TRUE|FALSE|?other)`
    pub(crate) fn exec_let(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let mut parsed = Args::new(args);

        if let Some(name) = parsed.sigil_name('#') {
            if !(parsed.skip_ws() && parsed.eat("BE")) {
                return Err(self.syntax(cursor));
            }
            let value = self.evaluate(parsed.rest(), cursor)?;
            self.env.set_num(name, value);
            return Ok(());
        }

        let name = parsed.sigil_name('?').ok_or_else(|| self.syntax(cursor))?;
        if !(parsed.skip_ws() && parsed.keyword("BE") && parsed.skip_ws()) {
            return Err(self.syntax(cursor));
        }
        let negate = parsed.eat("NOT");
        parsed.skip_ws();
        let value = if parsed.keyword("TRUE") {
            true
        } else if parsed.keyword("FALSE") {
            false
        } else if let Some(other) = parsed.sigil_name('?') {
            self.env
                .get_bool(other)
                .ok_or_else(|| Signal::from(undefined(cursor.line())))?
        } else {
            return Err(self.syntax(cursor));
        };
        if !parsed.is_blank() {
            return Err(self.syntax(cursor));
        }
        self.env.set_bool(name, value != negate);
        Ok(())
    }

    /// `READ prompt$x` / `READ prompt#x`
    pub(crate) fn exec_read(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let (prompt, target) = split_read_target(args).ok_or_else(|| self.syntax(cursor))?;
        self.write_raw(prompt)?;
        self.flush_output()?;

        let line = loop {
            match self.input.read_line_until(&self.interrupt) {
                Ok(line) => break line,
                // Another branch may have taken the interrupt already.
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    self.check_interrupt(cursor)?;
                }
                Err(source) => {
                    return Err(Signal::Fatal(RuntimeError::Read {
                        target: self.input.source_name(),
                        source,
                    }))
                }
            }
        };
        self.check_interrupt(cursor)?;
        let Some(line) = line else {
            return Err(self.raise(end_of_file(cursor.line(), self.input.source_name())));
        };

        match target {
            ReadTarget::Str(name) => self.env.set_str(name, line),
            ReadTarget::Num(name) => {
                let value: f64 = line.trim().parse().map_err(|_| self.syntax(cursor))?;
                self.env.set_num(name, value);
            }
        }
        Ok(())
    }

    /// `ATOI $s #n`
    pub(crate) fn exec_atoi(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let mut parsed = Args::new(args);
        let source = parsed.sigil_name('$').ok_or_else(|| self.syntax(cursor))?;
        parsed.skip_ws();
        let target = parsed.sigil_name('#').ok_or_else(|| self.syntax(cursor))?;
        if !parsed.is_blank() {
            return Err(self.syntax(cursor));
        }

        let text = self
            .env
            .get_str(source)
            .ok_or_else(|| Signal::from(undefined(cursor.line())))?;
        let value: f64 = text.trim().parse().map_err(|_| self.syntax(cursor))?;
        self.env.set_num(target, value);
        Ok(())
    }

    pub(crate) fn flush_output(&self) -> ExecResult {
        self.output.flush().map_err(|source| {
            Signal::Fatal(RuntimeError::Write {
                target: self.output.describe(),
                source,
            })
        })
    }
}

/// Split `READ` arguments into the prompt and the trailing variable.
///
/// String targets are `$c` (one character) or `$(name)`; numeric targets
/// are `#name` or `#(name)`.
fn split_read_target(args: &str) -> Option<(&str, ReadTarget<'_>)> {
    if let Some(open) = args.rfind("$(") {
        if let Some((name, consumed)) = scan_name(&args[open + 1..]) {
            if open + 1 + consumed == args.len() {
                return Some((&args[..open], ReadTarget::Str(name)));
            }
        }
    }

    let mut tail = args.char_indices().rev();
    if let (Some((last, _)), Some((sigil, '$'))) = (tail.next(), tail.next()) {
        return Some((&args[..sigil], ReadTarget::Str(&args[last..])));
    }

    let hash = args.rfind('#')?;
    let (name, consumed) = scan_name(&args[hash + 1..])?;
    if hash + 1 + consumed != args.len() {
        return None;
    }
    Some((&args[..hash], ReadTarget::Num(name)))
}
