//! Terminal statements: cursor movement, `HOME`, `COLOR` and `LINE`.

use super::args::split_top_level;
use super::Args;
use crate::interpolate::literal_text;
use crate::interpreter::{Cursor, Interpreter};
use crate::signal::ExecResult;
use crate::terminal::{self, Direction};

impl Interpreter {
    /// `UP n`, `DOWN n`, `LEFT n`, `RIGHT n`
    pub(crate) fn exec_move(
        &mut self,
        args: &str,
        cursor: &mut Cursor,
        direction: Direction,
    ) -> ExecResult {
        let count = self.evaluate(args, cursor)?.trunc() as i64;
        self.write_raw(&terminal::cursor_move(direction, count))
    }

    /// `HOME` or `HOME x, y`
    pub(crate) fn exec_home(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        if args.trim().is_empty() {
            return self.write_raw(terminal::HOME);
        }
        let (x, y) = args.split_once(',').ok_or_else(|| self.syntax(cursor))?;
        let x = self.evaluate(x, cursor)?.trunc() as i64;
        let y = self.evaluate(y, cursor)?.trunc() as i64;
        self.write_raw(&terminal::cursor_to(x, y))
    }

    /// `COLOR [BG] NAME` or `COLOR e1, e2, ...`
    pub(crate) fn exec_color(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let mut parsed = Args::new(args);
        parsed.skip_ws();
        let background = parsed.keyword("BG");
        parsed.skip_ws();
        if let Some(code) = terminal::named_color(parsed.rest().trim_end(), background) {
            return self.write_raw(&terminal::sgr(code));
        }

        let source = self.substitute(args, cursor)?;
        let mut codes = String::new();
        for part in split_top_level(&source) {
            let value = self.evaluate_source(part, cursor)?;
            codes.push_str(&terminal::sgr(value.trunc() as i64));
        }
        self.write_raw(&codes)
    }

    /// `LINE descriptor`
    pub(crate) fn exec_line(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let descriptor = self.interpolate(literal_text(args), cursor)?;
        let glyph = terminal::glyph(&descriptor).ok_or_else(|| self.syntax(cursor))?;
        self.write_raw(glyph.encode_utf8(&mut [0u8; 4]))
    }
}
