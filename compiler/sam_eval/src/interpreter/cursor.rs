use sam_diagnostic::{Line, DETACHED_LINE};

/// The "current line" cell shared by nested statement executions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor(Line);

impl Cursor {
    pub fn at(line: Line) -> Self {
        Cursor(line)
    }

    /// A cursor for immediate lines and handlers.
    pub fn detached() -> Self {
        Cursor(DETACHED_LINE)
    }

    #[inline]
    pub fn line(&self) -> Line {
        self.0
    }

    pub fn set(&mut self, line: Line) {
        self.0 = line;
    }

    /// Make `line` the next line the owning loop executes.
    pub fn jump(&mut self, line: Line) {
        self.0 = line - 1;
    }

    pub fn advance(&mut self) {
        self.0 += 1;
    }
}
