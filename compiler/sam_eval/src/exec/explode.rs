//! `EXPLODE $var INTO template`

use sam_diagnostic::{no_match, undefined};
use sam_patterns::{Capture, Template};

use super::Args;
use crate::interpolate::literal_text;
use crate::interpreter::{Cursor, Interpreter};
use crate::signal::{ExecResult, Signal};

impl Interpreter {
    pub(crate) fn exec_explode(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let mut parsed = Args::new(args);
        parsed.skip_ws();
        let source = parsed.sigil_name('$').ok_or_else(|| self.syntax(cursor))?;
        if !(parsed.skip_ws() && parsed.keyword("INTO")) {
            return Err(self.syntax(cursor));
        }
        let rest = parsed.rest();
        let Some(separator) = rest.chars().next().filter(|c| c.is_whitespace()) else {
            return Err(self.syntax(cursor));
        };
        let text = literal_text(&rest[separator.len_utf8()..]);

        let template = Template::compile(text).map_err(|err| {
            tracing::debug!(%err, template = text, "bad template");
            self.syntax(cursor)
        })?;
        let subject = self
            .env
            .get_str(source)
            .ok_or_else(|| Signal::from(undefined(cursor.line())))?;
        let Some(captures) = template.extract(subject) else {
            return Err(self.raise(no_match(cursor.line())));
        };

        for capture in captures {
            match capture {
                Capture::Str { name, value } => self.env.set_str(name, value),
                Capture::Num { name, value } => self.env.set_num(name, value),
            }
        }
        Ok(())
    }
}
